//! Terraform template loading for tfsync
//!
//! Turns one or more `.tf` files into a [`Declarations`] value: the declared
//! variables with their defaults, plus the optional linkage block that names
//! the remote workspace.
//!
//! ```hcl
//! atlas {
//!   name = "acme/network"
//! }
//!
//! variable "region" {
//!   default = "eu-west-1"
//! }
//! ```

pub mod error;
pub mod loader;
pub mod value;

pub use error::{Error, Result};
pub use loader::{Declarations, Linkage, VariableDeclaration, load, parse};
pub use value::DeclaredValue;
