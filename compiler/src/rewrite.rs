//! Expression rewriting.
//!
//! A `@transform` expression is written against an implicit receiver:
//! `.trim()` means "call trim on the field value". The scanner below finds
//! the dots that start a chain and puts the receiver in front of them, then
//! the rewriter wraps the result in a template tree that writes it back into
//! the mutation input.
//!
//! Scanner states:
//! - chain start: nothing that could be an operand precedes the cursor
//!   (start of input, an operator, an opening bracket, a comma, whitespace)
//! - operand: the cursor follows a name, a `$` reference, a number, a
//!   closing bracket, or a string literal
//! - string: inside a `'...'` or `"..."` literal, copied verbatim
//!
//! Only a dot seen at chain start is a receiver dot. A dot in operand state
//! joins two segments of a chain that is already written out.

use crate::{TransformArgs, TransformConfig};
use fieldform_template::{for_each, iff, not, qref, quote, Expr};

// ==================== RECEIVER SUBSTITUTION ====================

/// Bracket balance of a scanned expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Balance {
    Balanced,
    /// First byte offset where nesting went wrong: a closer without a
    /// matching opener, an opener never closed, or an unterminated string.
    Unbalanced { offset: usize },
}

impl Balance {
    pub fn is_balanced(&self) -> bool {
        matches!(self, Balance::Balanced)
    }
}

/// Result of receiver substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub text: String,
    pub balance: Balance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    ChainStart,
    Operand,
    InString { quote: char, escaped: bool },
}

/// Insert `receiver` in front of every receiver dot of `expression`.
///
/// A receiver dot followed by a name becomes `receiver.name`; a bare dot
/// (followed by neither a name nor a digit) is replaced by the receiver
/// itself. A dot before a digit starts a decimal literal and is kept,
/// unless it opens the expression (`.5` becomes `receiver.5`). Text
/// with unbalanced brackets is still rewritten, the problem is only
/// reported through `Substitution::balance`.
pub fn substitute_receiver(expression: &str, receiver: &str) -> Substitution {
    let mut text = String::with_capacity(expression.len() + receiver.len());
    let mut state = ScanState::ChainStart;
    let mut open: Vec<(char, usize)> = Vec::new();
    let mut mismatch: Option<usize> = None;

    let mut chars = expression.char_indices().peekable();
    while let Some((offset, c)) = chars.next() {
        state = match state {
            ScanState::InString { quote, escaped } => {
                text.push(c);
                if escaped {
                    ScanState::InString {
                        quote,
                        escaped: false,
                    }
                } else if c == '\\' {
                    ScanState::InString {
                        quote,
                        escaped: true,
                    }
                } else if c == quote {
                    open.pop();
                    ScanState::Operand
                } else {
                    state
                }
            }
            ScanState::ChainStart if c == '.' => {
                match chars.peek().map(|&(_, next)| next) {
                    Some(next) if is_name_start(next) => {
                        text.push_str(receiver);
                        text.push('.');
                    }
                    // `.5` is a decimal literal, except at the very start
                    Some(next) if next.is_ascii_digit() => {
                        if offset == 0 {
                            text.push_str(receiver);
                        }
                        text.push('.');
                    }
                    _ => text.push_str(receiver),
                }
                ScanState::Operand
            }
            _ => {
                text.push(c);
                match c {
                    '.' => ScanState::Operand,
                    '\'' | '"' => {
                        open.push((c, offset));
                        ScanState::InString {
                            quote: c,
                            escaped: false,
                        }
                    }
                    '(' | '[' | '{' => {
                        open.push((c, offset));
                        ScanState::ChainStart
                    }
                    ')' | ']' | '}' => {
                        if open.pop().map(|(o, _)| o) != Some(opener_of(c)) {
                            mismatch.get_or_insert(offset);
                        }
                        ScanState::Operand
                    }
                    c if is_operand_char(c) => ScanState::Operand,
                    _ => ScanState::ChainStart,
                }
            }
        };
    }

    let balance = match (mismatch, open.first()) {
        (Some(offset), _) => Balance::Unbalanced { offset },
        (None, Some(&(_, offset))) => Balance::Unbalanced { offset },
        (None, None) => Balance::Balanced,
    };

    Substitution { text, balance }
}

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_operand_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

fn opener_of(closer: char) -> char {
    match closer {
        ')' => '(',
        ']' => '[',
        _ => '{',
    }
}

// ==================== FIELD REFERENCE ====================

/// The field a directive is attached to, and its path in the mutation input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRef {
    pub type_name: String,
    pub field_name: String,
    input_root: String,
}

impl FieldRef {
    pub fn new(
        type_name: impl Into<String>,
        field_name: impl Into<String>,
        config: &TransformConfig,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            field_name: field_name.into(),
            input_root: config.input_root.clone(),
        }
    }

    /// Reference to the incoming value, e.g. `$ctx.args.input.title`.
    pub fn value_ref(&self) -> String {
        format!("{}.{}", self.input_root, self.field_name)
    }

    /// Reference to the input object the value lives in.
    pub fn input_ref(&self) -> &str {
        &self.input_root
    }
}

// ==================== REWRITER ====================

/// Output of the rewriter: the template tree plus the scan diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub expr: Expr,
    pub balance: Balance,
}

/// Builds the template tree for one `@transform` usage.
#[derive(Debug, Clone)]
pub struct Rewriter<'a> {
    config: &'a TransformConfig,
}

impl<'a> Rewriter<'a> {
    pub fn new(config: &'a TransformConfig) -> Self {
        Self { config }
    }

    /// Rewrite `args.expression` for `field`.
    ///
    /// Without `foreach` the result is written back with
    /// `input.put('<field>', ...)`; with `foreach` every entry is replaced
    /// in place with `value.set($foreach.index, ...)`. Unless `always` is
    /// set, the whole statement only runs when the value is not null.
    pub fn rewrite(&self, field: &FieldRef, args: &TransformArgs) -> Rewrite {
        let value = field.value_ref();

        let (body, balance) = if args.foreach {
            let entry = format!("${}", self.config.entry_var);
            let sub = substitute_receiver(&args.expression, &entry);
            let set = qref(format!("{}.set($foreach.index, {})", value, sub.text));
            (
                for_each(self.config.entry_var.clone(), value.clone(), vec![set]),
                sub.balance,
            )
        } else {
            let sub = substitute_receiver(&args.expression, &value);
            let put = qref(format!(
                "{}.put({}, {})",
                field.input_ref(),
                quote(&field.field_name),
                sub.text
            ));
            (put, sub.balance)
        };

        let expr = if args.always {
            body
        } else {
            iff(not(format!("$util.isNull({})", value)), body)
        };

        Rewrite { expr, balance }
    }
}
