//! Rendering expression trees to mapping-template text.

use crate::Expr;

/// Turns an expression tree into template text.
pub trait Render {
    /// Render a tree as template text.
    fn render(&self, expr: &Expr) -> String;

    /// Render a tree wrapped in start/end marker comments.
    fn render_block(&self, header: &str, expr: &Expr) -> String {
        format!(
            "## [Start] {header}. **\n{}\n## [End] {header}. **",
            self.render(expr)
        )
    }
}

/// Velocity (VTL) printer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VtlPrinter {
    indent: usize,
}

impl Default for VtlPrinter {
    fn default() -> Self {
        Self { indent: 2 }
    }
}

impl VtlPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `indent` spaces per nesting level.
    pub fn with_indent(indent: usize) -> Self {
        Self { indent }
    }

    fn print(&self, expr: &Expr, level: usize, lines: &mut Vec<String>) {
        let pad = " ".repeat(self.indent * level);
        match expr {
            Expr::Conditional { guard, body } => {
                lines.push(format!("{pad}#if( {} )", self.inline(guard)));
                self.print(body, level + 1, lines);
                lines.push(format!("{pad}#end"));
            }
            Expr::Loop {
                var,
                collection,
                body,
            } => {
                lines.push(format!("{pad}#foreach( ${var} in {collection} )"));
                for item in body {
                    self.print(item, level + 1, lines);
                }
                lines.push(format!("{pad}#end"));
            }
            Expr::MutatingCall(call) => lines.push(format!("{pad}$util.qr({call})")),
            Expr::Raw(text) => lines.push(format!("{pad}{text}")),
        }
    }

    /// Single-line form, used for guard conditions.
    fn inline(&self, expr: &Expr) -> String {
        match expr {
            Expr::Raw(text) => text.clone(),
            Expr::MutatingCall(call) => format!("$util.qr({call})"),
            other => {
                let mut lines = Vec::new();
                self.print(other, 0, &mut lines);
                lines.join(" ")
            }
        }
    }
}

impl Render for VtlPrinter {
    fn render(&self, expr: &Expr) -> String {
        let mut lines = Vec::new();
        self.print(expr, 0, &mut lines);
        lines.join("\n")
    }
}
