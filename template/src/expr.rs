//! Mapping template expression tree.

/// A node of a generated mapping template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// `#if( guard ) body #end`
    Conditional { guard: Box<Expr>, body: Box<Expr> },
    /// `#foreach( $var in collection ) body... #end`
    Loop {
        var: String,
        collection: String,
        body: Vec<Expr>,
    },
    /// A call evaluated only for its side effect, printed as `$util.qr(...)`.
    MutatingCall(String),
    /// Template text emitted verbatim.
    Raw(String),
}

impl Expr {
    pub fn is_conditional(&self) -> bool {
        matches!(self, Expr::Conditional { .. })
    }

    pub fn is_loop(&self) -> bool {
        matches!(self, Expr::Loop { .. })
    }

    /// Depth-first walk over this node and all of its children.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Expr)) {
        visit(self);
        match self {
            Expr::Conditional { guard, body } => {
                guard.walk(visit);
                body.walk(visit);
            }
            Expr::Loop { body, .. } => {
                for expr in body {
                    expr.walk(visit);
                }
            }
            Expr::MutatingCall(_) | Expr::Raw(_) => {}
        }
    }

    /// Number of `MutatingCall` nodes in the tree.
    pub fn mutating_calls(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |e| {
            if matches!(e, Expr::MutatingCall(_)) {
                count += 1;
            }
        });
        count
    }
}

// ==================== BUILDERS ====================

pub fn iff(guard: Expr, body: Expr) -> Expr {
    Expr::Conditional {
        guard: Box::new(guard),
        body: Box::new(body),
    }
}

/// Loop binding `$var` over the reference `collection`.
pub fn for_each(var: impl Into<String>, collection: impl Into<String>, body: Vec<Expr>) -> Expr {
    Expr::Loop {
        var: var.into(),
        collection: collection.into(),
        body,
    }
}

pub fn qref(call: impl Into<String>) -> Expr {
    Expr::MutatingCall(call.into())
}

pub fn raw(text: impl Into<String>) -> Expr {
    Expr::Raw(text.into())
}

/// Negate a raw condition: `!cond`.
pub fn not(condition: impl AsRef<str>) -> Expr {
    Expr::Raw(format!("!{}", condition.as_ref()))
}

/// Quote a string as a single-quoted template literal, doubling embedded quotes.
pub fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}
