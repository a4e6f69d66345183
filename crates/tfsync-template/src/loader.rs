//! Template loading
//!
//! Reads `variable` blocks and the workspace linkage block out of Terraform
//! templates. Everything else in the template is ignored.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use hcl::eval::{Context, Evaluate};
use hcl::{Block, Body, Expression};
use tracing::debug;

use crate::value::DeclaredValue;
use crate::{Error, Result};

/// A variable declared in a template
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    pub name: String,
    /// Always present; synthesized as `""` when the template omits it
    pub default: DeclaredValue,
}

impl VariableDeclaration {
    pub fn new(name: impl Into<String>, default: impl Into<DeclaredValue>) -> Self {
        Self {
            name: name.into(),
            default: default.into(),
        }
    }
}

/// Reference to a remote workspace embedded in a template
///
/// `name` is kept verbatim; it is expected to read `organization/workspace`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Linkage {
    pub name: String,
}

/// Everything tfsync needs from a set of templates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Declarations {
    variables: BTreeMap<String, VariableDeclaration>,
    linkage: Option<Linkage>,
}

impl Declarations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder used by tests and callers that assemble declarations by hand
    pub fn with_variable(mut self, name: &str, default: impl Into<DeclaredValue>) -> Self {
        self.variables
            .insert(name.to_string(), VariableDeclaration::new(name, default));
        self
    }

    pub fn with_linkage(mut self, name: impl Into<String>) -> Self {
        self.linkage = Some(Linkage { name: name.into() });
        self
    }

    pub fn variables(&self) -> &BTreeMap<String, VariableDeclaration> {
        &self.variables
    }

    pub fn get(&self, name: &str) -> Option<&VariableDeclaration> {
        self.variables.get(name)
    }

    pub fn linkage(&self) -> Option<&Linkage> {
        self.linkage.as_ref()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Merge another document into this one
    ///
    /// The first linkage block seen wins.
    fn merge(&mut self, other: Declarations, path: &Path) -> Result<()> {
        for (name, declaration) in other.variables {
            if self.variables.contains_key(&name) {
                return Err(Error::DuplicateVariable {
                    name,
                    path: path.to_path_buf(),
                });
            }
            self.variables.insert(name, declaration);
        }
        if self.linkage.is_none() {
            self.linkage = other.linkage;
        }
        Ok(())
    }
}

/// Load declarations from a `.tf` file or from every `.tf` file in a directory
///
/// Directory entries are read in file-name order.
pub fn load(path: &Path) -> Result<Declarations> {
    if !path.is_dir() {
        let source = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        return parse(&source, path);
    }

    let mut files: Vec<PathBuf> = fs::read_dir(path)
        .map_err(|e| Error::io(path, e))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "tf"))
        .collect();
    files.sort();

    let mut declarations = Declarations::new();
    for file in &files {
        let source = fs::read_to_string(file).map_err(|e| Error::io(file, e))?;
        declarations.merge(parse(&source, file)?, file)?;
    }
    debug!(
        dir = %path.display(),
        files = files.len(),
        variables = declarations.len(),
        "Loaded template directory"
    );
    Ok(declarations)
}

/// Parse a single HCL document
///
/// `origin` is only used for error messages.
pub fn parse(source: &str, origin: &Path) -> Result<Declarations> {
    let body: Body = hcl::parse(source).map_err(|e| Error::Parse {
        path: origin.to_path_buf(),
        message: e.to_string(),
    })?;

    let ctx = Context::new();
    let mut declarations = Declarations::new();

    for block in body.blocks() {
        match block.identifier() {
            "variable" => {
                let declaration = parse_variable(block, &ctx, origin)?;
                let probe = Declarations {
                    variables: BTreeMap::from([(declaration.name.clone(), declaration)]),
                    linkage: None,
                };
                declarations.merge(probe, origin)?;
            }
            "atlas" => {
                if declarations.linkage.is_none() {
                    declarations.linkage = linkage_name(block.body(), &ctx, origin)?;
                }
            }
            "terraform" => {
                let backend = block.body().blocks().find(|b| {
                    b.identifier() == "backend"
                        && b.labels().first().map(|l| l.as_str()) == Some("atlas")
                });
                if let Some(backend) = backend
                    && declarations.linkage.is_none()
                {
                    declarations.linkage = linkage_name(backend.body(), &ctx, origin)?;
                }
            }
            _ => {}
        }
    }

    debug!(
        template = %origin.display(),
        variables = declarations.len(),
        linked = declarations.linkage.is_some(),
        "Parsed template"
    );
    Ok(declarations)
}

fn parse_variable(block: &Block, ctx: &Context, origin: &Path) -> Result<VariableDeclaration> {
    let name = match block.labels() {
        [label] => label.as_str().to_string(),
        labels => {
            return Err(Error::InvalidBlock {
                path: origin.to_path_buf(),
                block: "variable".to_string(),
                message: format!("expected exactly one label, found {}", labels.len()),
            });
        }
    };

    let default = match attribute(block.body(), "default") {
        Some(expr) => {
            let value = evaluate(expr, ctx).map_err(|message| Error::Evaluate {
                path: origin.to_path_buf(),
                name: name.clone(),
                message,
            })?;
            DeclaredValue::from_json(&name, value)?
        }
        None => DeclaredValue::empty(),
    };

    Ok(VariableDeclaration { name, default })
}

fn linkage_name(body: &Body, ctx: &Context, origin: &Path) -> Result<Option<Linkage>> {
    let Some(expr) = attribute(body, "name") else {
        return Ok(None);
    };
    let value = evaluate(expr, ctx).map_err(|message| Error::Evaluate {
        path: origin.to_path_buf(),
        name: "name".to_string(),
        message,
    })?;
    match value {
        serde_json::Value::String(name) => Ok(Some(Linkage { name })),
        other => Err(Error::InvalidBlock {
            path: origin.to_path_buf(),
            block: "atlas".to_string(),
            message: format!("name must be a string, found {other}"),
        }),
    }
}

fn attribute<'a>(body: &'a Body, key: &str) -> Option<&'a Expression> {
    body.attributes()
        .find(|attr| attr.key() == key)
        .map(|attr| attr.expr())
}

fn evaluate(expr: &Expression, ctx: &Context) -> std::result::Result<serde_json::Value, String> {
    let value = expr.evaluate(ctx).map_err(|e| e.to_string())?;
    serde_json::to_value(value).map_err(|e| e.to_string())
}
