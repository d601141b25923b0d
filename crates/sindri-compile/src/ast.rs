//! Statement-tree input to the compiler.
//!
//! One [`Function`] is the unit of compilation: an ordered parameter list
//! with declared bit-widths and a sequence of statements. The enums are
//! closed; anything the lowering cannot express simply has no representation
//! here, and the few data-dependent rejections (non-constant shift distances,
//! statements after a return) are raised by the walker.

use serde::{Deserialize, Serialize};

/// A binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinOp {
    /// Bitwise exclusive or.
    Xor,
    /// Bitwise and.
    And,
    /// Bitwise or.
    Or,
    /// Left shift by a constant distance.
    Shl,
    /// Right shift by a constant distance.
    Shr,
}

/// An expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expr {
    /// Reference to a bound variable.
    Name(String),
    /// Unsigned integer literal.
    Int(u64),
    /// Boolean literal (a 1-bit constant).
    Bool(bool),
    /// Bitwise inversion.
    Not(Box<Expr>),
    /// Binary operation.
    Bin {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

impl Expr {
    /// Reference a variable.
    pub fn name(name: impl Into<String>) -> Self {
        Expr::Name(name.into())
    }

    /// Integer literal.
    pub fn int(value: u64) -> Self {
        Expr::Int(value)
    }

    /// Bitwise inversion.
    pub fn not(operand: Expr) -> Self {
        Expr::Not(Box::new(operand))
    }

    /// Binary operation.
    pub fn bin(op: BinOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Bin {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// `lhs ^ rhs`
    pub fn xor(lhs: Expr, rhs: Expr) -> Self {
        Expr::bin(BinOp::Xor, lhs, rhs)
    }

    /// `lhs & rhs`
    pub fn and(lhs: Expr, rhs: Expr) -> Self {
        Expr::bin(BinOp::And, lhs, rhs)
    }

    /// `lhs | rhs`
    pub fn or(lhs: Expr, rhs: Expr) -> Self {
        Expr::bin(BinOp::Or, lhs, rhs)
    }

    /// `lhs << rhs`
    pub fn shl(lhs: Expr, rhs: Expr) -> Self {
        Expr::bin(BinOp::Shl, lhs, rhs)
    }

    /// `lhs >> rhs`
    pub fn shr(lhs: Expr, rhs: Expr) -> Self {
        Expr::bin(BinOp::Shr, lhs, rhs)
    }

    /// Unwrap a chain of one associative operator into its source list.
    ///
    /// `a ^ b ^ c` flattens under [`BinOp::Xor`] to `[a, b, c]`; any
    /// sub-expression with a different operator stays opaque.
    pub fn flatten(&self, op: BinOp) -> Vec<&Expr> {
        fn walk<'a>(expr: &'a Expr, op: BinOp, out: &mut Vec<&'a Expr>) {
            match expr {
                Expr::Bin { op: o, lhs, rhs } if *o == op => {
                    walk(lhs, op, out);
                    walk(rhs, op, out);
                }
                other => out.push(other),
            }
        }
        let mut out = vec![];
        walk(self, op, &mut out);
        out
    }
}

/// A statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stmt {
    /// `target = value`, with an optional declared bit-width on the target.
    Assign {
        target: String,
        width: Option<u32>,
        value: Expr,
    },
    /// `if test: then_body else: else_body`.
    If {
        test: Expr,
        then_body: Vec<Stmt>,
        else_body: Vec<Stmt>,
    },
    /// `return value`.
    Return(Expr),
}

impl Stmt {
    /// `target = value`
    pub fn assign(target: impl Into<String>, value: Expr) -> Self {
        Stmt::Assign {
            target: target.into(),
            width: None,
            value,
        }
    }

    /// `target: width = value`
    pub fn assign_width(target: impl Into<String>, width: u32, value: Expr) -> Self {
        Stmt::Assign {
            target: target.into(),
            width: Some(width),
            value,
        }
    }

    /// `if test: then_body`
    pub fn if_then(test: Expr, then_body: Vec<Stmt>) -> Self {
        Stmt::If {
            test,
            then_body,
            else_body: vec![],
        }
    }

    /// `if test: then_body else: else_body`
    pub fn if_else(test: Expr, then_body: Vec<Stmt>, else_body: Vec<Stmt>) -> Self {
        Stmt::If {
            test,
            then_body,
            else_body,
        }
    }

    /// `return value`
    pub fn ret(value: Expr) -> Self {
        Stmt::Return(value)
    }
}

/// A function parameter with its declared bit-width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    /// Parameter name.
    pub name: String,
    /// Bit-width of the argument register.
    pub width: u32,
}

impl Param {
    /// Create a parameter.
    pub fn new(name: impl Into<String>, width: u32) -> Self {
        Self {
            name: name.into(),
            width,
        }
    }
}

/// One function to compile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Function {
    /// Function name (becomes the circuit name).
    pub name: String,
    /// Ordered parameter list.
    pub params: Vec<Param>,
    /// Statement body.
    pub body: Vec<Stmt>,
}

impl Function {
    /// Create a function.
    pub fn new(name: impl Into<String>, params: Vec<Param>, body: Vec<Stmt>) -> Self {
        Self {
            name: name.into(),
            params,
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_chain() {
        let e = Expr::xor(
            Expr::xor(Expr::name("a"), Expr::name("b")),
            Expr::name("c"),
        );
        let sources = e.flatten(BinOp::Xor);
        assert_eq!(
            sources,
            vec![&Expr::name("a"), &Expr::name("b"), &Expr::name("c")]
        );
    }

    #[test]
    fn test_flatten_stops_at_other_ops() {
        let inner = Expr::and(Expr::name("a"), Expr::name("b"));
        let e = Expr::xor(inner.clone(), Expr::name("c"));
        let sources = e.flatten(BinOp::Xor);
        assert_eq!(sources, vec![&inner, &Expr::name("c")]);
    }

    #[test]
    fn test_flatten_non_bin() {
        let e = Expr::name("a");
        assert_eq!(e.flatten(BinOp::Or), vec![&Expr::name("a")]);
    }
}
