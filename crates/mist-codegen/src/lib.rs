//! MistCSS Code Generator
//!
//! Renders a [`ComponentDescriptor`] as a typed React component (TSX) that
//! imports the stylesheet, applies the scope class, and maps each variant
//! prop to its `data-*` attribute.
//!
//! ```text
//! ComponentDescriptor → render("Button", ..) → Button.mist.css.tsx source
//! ```

pub mod naming;
pub mod tsx;

use mist_extract::ComponentDescriptor;

pub use naming::{component_name, is_mist_file, output_path, EXTENSION};

/// Code generation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Codegen error: {message}")]
pub struct CodegenError {
    pub message: String,
}

/// Rendering options.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// First line of the output. Empty for none.
    pub header: String,
    /// Emit `import './<name>.mist.css'`.
    pub import_stylesheet: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            header: "// Generated by MistCSS, do not modify".into(),
            import_stylesheet: true,
        }
    }
}

/// Render the component `name` with default options.
pub fn render(name: &str, descriptor: &ComponentDescriptor) -> Result<String, CodegenError> {
    render_with(name, descriptor, &RenderOptions::default())
}

/// Render the component `name`.
pub fn render_with(
    name: &str,
    descriptor: &ComponentDescriptor,
    options: &RenderOptions,
) -> Result<String, CodegenError> {
    tsx::generate(name, descriptor, options)
}

/// Compile stylesheet source straight to TSX.
pub fn compile(name: &str, source: &str) -> Result<String, CompileError> {
    let descriptor = mist_extract::parse_input(source)?;
    Ok(render(name, &descriptor)?)
}

/// Failure of the whole source-to-TSX pipeline.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompileError {
    #[error(transparent)]
    Parse(#[from] mist_extract::ParseError),
    #[error(transparent)]
    Codegen(#[from] CodegenError),
}
