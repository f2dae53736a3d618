//! Hand-built programs used by the command line driver and the tests.
//!
//! Each sample comes with the symbol table its scopes and procedure entries
//! point into, as a parser would have produced them.

use crate::ast::{
    AssignmentNode, BinaryOperator, BlockNode, CallNode, DeclList, DoBranchNode, DoNode, ExpNode,
    IfNode, ListNode, Location, ProcedureDecl, ReadNode, Statement, UnaryOperator, WhileNode,
    WriteNode,
};
use crate::semantic::symboltable::SymbolTable;
use crate::utils::errors::{Pl0Error, Pl0Result};

pub const SAMPLE_NAMES: [&str; 4] = ["swap", "guarded", "nested", "broken"];

pub struct Sample {
    pub name: &'static str,
    pub table: SymbolTable,
    pub program: BlockNode,
}

pub fn build(name: &str) -> Pl0Result<Sample> {
    match name {
        "swap" => swap(),
        "guarded" => guarded(),
        "nested" => nested(),
        "broken" => broken(),
        other => Err(Pl0Error::compilation_error(
            "sample selection",
            format!("Unknown sample '{}'. Available: {}", other, SAMPLE_NAMES.join(", ")),
        )),
    }
}

fn at(line: usize, column: usize) -> Location {
    Location::new(line, column)
}

fn id(line: usize, column: usize, name: &str) -> ExpNode {
    ExpNode::identifier(at(line, column), name)
}

fn num(line: usize, column: usize, value: i64) -> ExpNode {
    ExpNode::constant(at(line, column), value)
}

fn binary(line: usize, column: usize, op: BinaryOperator, left: ExpNode, right: ExpNode) -> ExpNode {
    ExpNode::binary(at(line, column), op, left, right)
}

fn assign(line: usize, target: &str, value: ExpNode) -> Statement {
    AssignmentNode::single(at(line, 3), id(line, 3, target), value).into()
}

// var a, b;
// begin a := 1; b := 2; a, b := b, a; write a; write b end
fn swap() -> Pl0Result<Sample> {
    let mut table = SymbolTable::new();
    let root = table.root();
    table.define_variable(root, "a", 1)?;
    table.define_variable(root, "b", 1)?;

    let swap = AssignmentNode::new(
        at(5, 3),
        vec![id(5, 3, "a"), id(5, 6, "b")],
        vec![id(5, 11, "b"), id(5, 14, "a")],
    )?;
    let body = ListNode::new(
        at(3, 3),
        vec![
            assign(3, "a", num(3, 8, 1)),
            assign(4, "b", num(4, 8, 2)),
            swap.into(),
            WriteNode::new(at(6, 3), id(6, 9, "a")).into(),
            WriteNode::new(at(7, 3), id(7, 9, "b")).into(),
        ],
    );
    Ok(Sample {
        name: "swap",
        program: BlockNode::new(at(2, 1), DeclList::default(), body.into(), root),
        table,
    })
}

// var x, y;
// begin read x; read y;
//   do x > y then x := x - y
//   [] y > x then y := y - x
//   [] x = y then write x exit
//   od
// end
fn guarded() -> Pl0Result<Sample> {
    let mut table = SymbolTable::new();
    let root = table.root();
    table.define_variable(root, "x", 1)?;
    table.define_variable(root, "y", 1)?;

    let branches = vec![
        DoBranchNode::new(
            at(4, 6),
            binary(4, 8, BinaryOperator::Greater, id(4, 6, "x"), id(4, 10, "y")),
            assign(4, "x", binary(4, 22, BinaryOperator::Sub, id(4, 22, "x"), id(4, 26, "y"))),
            false,
        ),
        DoBranchNode::new(
            at(5, 6),
            binary(5, 8, BinaryOperator::Greater, id(5, 6, "y"), id(5, 10, "x")),
            assign(5, "y", binary(5, 22, BinaryOperator::Sub, id(5, 22, "y"), id(5, 26, "x"))),
            false,
        ),
        DoBranchNode::new(
            at(6, 6),
            binary(6, 8, BinaryOperator::Equal, id(6, 6, "x"), id(6, 10, "y")),
            WriteNode::new(at(6, 17), id(6, 23, "x")).into(),
            true,
        ),
    ];
    let body = ListNode::new(
        at(3, 3),
        vec![
            ReadNode::new(at(3, 3), id(3, 8, "x")).into(),
            ReadNode::new(at(3, 11), id(3, 16, "y")).into(),
            DoNode::new(at(4, 3), branches).into(),
        ],
    );
    Ok(Sample {
        name: "guarded",
        program: BlockNode::new(at(2, 1), DeclList::default(), body.into(), root),
        table,
    })
}

// const limit = 3;
// var n;
// procedure outer =
//   procedure inner = begin write (limit * 2) + 1 end;
//   begin n := limit; while n > 0 do begin call inner; n := n - 1 end end;
// begin if 2 * 3 > 5 then call outer; call missing end
fn nested() -> Pl0Result<Sample> {
    let mut table = SymbolTable::new();
    let root = table.root();
    table.define_constant(root, "limit", 3, 1)?;
    table.define_variable(root, "n", 2)?;
    let outer = table.define_procedure(root, "outer", 3)?;
    let outer_scope = table.procedure(outer)?.local_scope;
    let inner = table.define_procedure(outer_scope, "inner", 4)?;
    let inner_scope = table.procedure(inner)?.local_scope;

    let inner_body = WriteNode::new(
        at(4, 27),
        binary(
            4,
            33,
            BinaryOperator::Add,
            binary(4, 34, BinaryOperator::Mul, id(4, 34, "limit"), num(4, 42, 2)),
            num(4, 47, 1),
        ),
    );
    let inner_block = BlockNode::new(at(4, 21), DeclList::default(), inner_body.into(), inner_scope);

    let loop_body = ListNode::new(
        at(5, 42),
        vec![
            CallNode::new(at(5, 42), "inner").into(),
            assign(5, "n", binary(5, 61, BinaryOperator::Sub, id(5, 61, "n"), num(5, 65, 1))),
        ],
    );
    let outer_body = ListNode::new(
        at(5, 9),
        vec![
            assign(5, "n", id(5, 14, "limit")),
            WhileNode::new(
                at(5, 21),
                binary(5, 27, BinaryOperator::Greater, id(5, 27, "n"), num(5, 31, 0)),
                loop_body.into(),
            )
            .into(),
        ],
    );
    let outer_block = BlockNode::new(
        at(4, 3),
        DeclList::new(vec![ProcedureDecl::new(at(4, 3), "inner", inner, inner_block)]),
        outer_body.into(),
        outer_scope,
    );

    let condition = binary(
        6,
        10,
        BinaryOperator::Greater,
        binary(6, 10, BinaryOperator::Mul, num(6, 10, 2), num(6, 14, 3)),
        num(6, 18, 5),
    );
    let body = ListNode::new(
        at(6, 7),
        vec![
            IfNode::without_else(at(6, 7), condition, CallNode::new(at(6, 25), "outer").into()).into(),
            CallNode::new(at(6, 37), "missing").into(),
        ],
    );
    Ok(Sample {
        name: "nested",
        program: BlockNode::new(
            at(3, 1),
            DeclList::new(vec![ProcedureDecl::new(at(3, 1), "outer", outer, outer_block)]),
            body.into(),
            root,
        ),
        table,
    })
}

// var x;
// begin skip; <malformed>; write x; x := -(4 - 6); while odd <malformed> do skip end
fn broken() -> Pl0Result<Sample> {
    let mut table = SymbolTable::new();
    let root = table.root();
    table.define_variable(root, "x", 1)?;

    let negated = ExpNode::unary(
        at(2, 33),
        UnaryOperator::Neg,
        binary(2, 35, BinaryOperator::Sub, num(2, 35, 4), num(2, 39, 6)),
    );
    let body = ListNode::new(
        at(2, 7),
        vec![
            Statement::skip(at(2, 7)),
            Statement::error(at(2, 13)),
            WriteNode::new(at(2, 26), id(2, 32, "x")).into(),
            AssignmentNode::single(at(2, 35), id(2, 35, "x"), negated).into(),
            WhileNode::new(
                at(2, 50),
                ExpNode::unary(at(2, 56), UnaryOperator::Odd, ExpNode::error(at(2, 60))),
                Statement::skip(at(2, 75)),
            )
            .into(),
        ],
    );
    Ok(Sample {
        name: "broken",
        program: BlockNode::new(at(2, 1), DeclList::default(), body.into(), root),
        table,
    })
}
