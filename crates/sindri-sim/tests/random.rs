//! Randomized identities over 8-bit operands.

use proptest::prelude::*;
use rustc_hash::FxHashMap;
use sindri_compile::{Compiler, Expr, Function, Param, Stmt};
use sindri_sim::execute;

fn run2(func: &Function, a: u64, b: u64) -> u64 {
    let compiled = Compiler::compile(func).unwrap();
    let mut args = FxHashMap::default();
    args.insert("a".to_string(), a);
    args.insert("b".to_string(), b);
    execute(&compiled, &args).unwrap().ret.unwrap()
}

fn binop_func(value: Expr) -> Function {
    Function::new(
        "f",
        vec![Param::new("a", 8), Param::new("b", 8)],
        vec![Stmt::ret(value)],
    )
}

proptest! {
    #[test]
    fn xor_matches_native(a in 0u64..256, b in 0u64..256) {
        let func = binop_func(Expr::xor(Expr::name("a"), Expr::name("b")));
        prop_assert_eq!(run2(&func, a, b), a ^ b);
    }

    #[test]
    fn and_matches_native(a in 0u64..256, b in 0u64..256) {
        let func = binop_func(Expr::and(Expr::name("a"), Expr::name("b")));
        prop_assert_eq!(run2(&func, a, b), a & b);
    }

    #[test]
    fn or_matches_native(a in 0u64..256, b in 0u64..256) {
        let func = binop_func(Expr::or(Expr::name("a"), Expr::name("b")));
        prop_assert_eq!(run2(&func, a, b), a | b);
    }

    #[test]
    fn not_matches_native(a in 0u64..256) {
        let func = Function::new(
            "f",
            vec![Param::new("a", 8)],
            vec![Stmt::ret(Expr::not(Expr::name("a")))],
        );
        let compiled = Compiler::compile(&func).unwrap();
        let mut args = FxHashMap::default();
        args.insert("a".to_string(), a);
        let out = execute(&compiled, &args).unwrap();
        prop_assert_eq!(out.ret, Some(!a & 0xff));
    }

    #[test]
    fn absorption(a in 0u64..256, b in 0u64..256) {
        // a & (a | b) == a
        let func = binop_func(Expr::and(
            Expr::name("a"),
            Expr::or(Expr::name("a"), Expr::name("b")),
        ));
        prop_assert_eq!(run2(&func, a, b), a);
    }

    #[test]
    fn xor_chain_matches_native(a in 0u64..256, b in 0u64..256, c in 0u64..256) {
        let func = Function::new(
            "f",
            vec![Param::new("a", 8), Param::new("b", 8), Param::new("c", 8)],
            vec![Stmt::ret(Expr::xor(
                Expr::xor(Expr::name("a"), Expr::name("b")),
                Expr::name("c"),
            ))],
        );
        let compiled = Compiler::compile(&func).unwrap();
        let mut args = FxHashMap::default();
        args.insert("a".to_string(), a);
        args.insert("b".to_string(), b);
        args.insert("c".to_string(), c);
        let out = execute(&compiled, &args).unwrap();
        prop_assert_eq!(out.ret, Some(a ^ b ^ c));
    }
}
