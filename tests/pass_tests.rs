use pl0tree::ast::{
    AssignmentNode, BinaryOperator, BlockNode, CallNode, DeclList, DoBranchNode, DoNode, ExpKind,
    ExpNode, ListNode, Location, Node, ProcedureDecl, ReadNode, Statement, StatementVariant,
    WriteNode,
};
use pl0tree::errors::{Pl0Error, Pl0Result};
use pl0tree::passes::{folder, resolve_names, ConstantFolder, NameResolver, StatementCounter};
use pl0tree::samples;
use pl0tree::semantic::symboltable::SymbolTable;

#[cfg(test)]
mod tests {
    use super::*;

    fn at(line: usize) -> Location {
        Location::new(line, 1)
    }

    fn id(name: &str) -> ExpNode {
        ExpNode::identifier(at(1), name)
    }

    fn num(value: i64) -> ExpNode {
        ExpNode::constant(at(1), value)
    }

    fn calls(statement: &Statement, out: &mut Vec<(String, bool)>) {
        match statement {
            Statement::Call(call) => out.push((call.name().to_string(), call.is_resolved())),
            Statement::List(list) => list.statements().iter().for_each(|s| calls(s, out)),
            Statement::If(node) => {
                calls(node.then_branch(), out);
                calls(node.else_branch(), out);
            }
            Statement::While(node) => calls(node.body(), out),
            Statement::Block(block) => {
                for procedure in block.procedures().procedures() {
                    calls(&procedure.block().clone().into(), out);
                }
                calls(block.body(), out);
            }
            _ => {}
        }
    }

    #[test]
    fn test_resolver_binds_calls_through_scopes() -> Pl0Result<()> {
        let mut sample = samples::build("nested")?;
        let mut resolver = NameResolver::new(&sample.table);
        sample.program.accept_mut(&mut resolver)?;

        assert_eq!(resolver.resolved_calls(), 2);
        let diagnostics = resolver.into_diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert!(matches!(
            &diagnostics[0],
            Pl0Error::UndefinedSymbol { name, line: 6 } if name == "missing"
        ));

        let mut found = Vec::new();
        calls(&sample.program.clone().into(), &mut found);
        assert_eq!(
            found,
            vec![
                ("inner".to_string(), true),
                ("outer".to_string(), true),
                ("missing".to_string(), false),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_resolver_entry_points_at_declared_procedure() -> Pl0Result<()> {
        let mut table = SymbolTable::new();
        let root = table.root();
        let entry = table.define_procedure(root, "p", 1)?;
        let mut program = BlockNode::new(at(1), DeclList::default(), CallNode::new(at(2), "p").into(), root);

        let diagnostics = resolve_names(&mut program, &table)?;
        assert!(diagnostics.is_empty());
        match program.body() {
            Statement::Call(call) => assert_eq!(call.entry(), Some(entry)),
            other => panic!("expected a call, got {:?}", other.variant()),
        }
        Ok(())
    }

    #[test]
    fn test_resolver_rejects_call_of_variable() -> Pl0Result<()> {
        let mut table = SymbolTable::new();
        let root = table.root();
        table.define_variable(root, "v", 1)?;
        let mut program = BlockNode::new(at(1), DeclList::default(), CallNode::new(at(3), "v").into(), root);

        let diagnostics = resolve_names(&mut program, &table)?;
        assert_eq!(diagnostics.len(), 1);
        assert!(matches!(
            &diagnostics[0],
            Pl0Error::TypeMismatch { expected, found, line: 3, .. }
                if expected == "Procedure" && found == "Variable"
        ));
        match program.body() {
            Statement::Call(call) => assert!(!call.is_resolved()),
            other => panic!("expected a call, got {:?}", other.variant()),
        }
        Ok(())
    }

    #[test]
    fn test_resolver_rewrites_operands_in_place() -> Pl0Result<()> {
        let mut table = SymbolTable::new();
        let root = table.root();
        table.define_variable(root, "a", 1)?;
        table.define_variable(root, "b", 1)?;
        table.define_constant(root, "k", 9, 1)?;

        let body = ListNode::new(
            at(2),
            vec![
                AssignmentNode::new(at(2), vec![id("a"), id("b")], vec![id("b"), id("k")])?.into(),
                ReadNode::new(at(3), id("k")).into(),
                WriteNode::new(at(4), id("nope")).into(),
            ],
        );
        let mut program = BlockNode::new(at(1), DeclList::default(), body.into(), root);
        let diagnostics = resolve_names(&mut program, &table)?;

        assert_eq!(diagnostics.len(), 2);
        assert!(matches!(&diagnostics[0], Pl0Error::TypeMismatch { name, .. } if name == "k"));
        assert!(matches!(&diagnostics[1], Pl0Error::UndefinedSymbol { name, .. } if name == "nope"));

        let list = match program.body() {
            Statement::List(list) => list,
            other => panic!("expected a list, got {:?}", other.variant()),
        };
        match &list.statements()[0] {
            Statement::Assignment(node) => {
                assert_eq!(node.len(), 2);
                assert!(node.targets().iter().all(|t| matches!(t.kind(), ExpKind::Variable { .. })));
                assert!(matches!(node.value(0).map(|v| v.kind()), Some(ExpKind::Variable { .. })));
                assert_eq!(node.value(1).and_then(|v| v.as_constant()), Some(9));
            }
            other => panic!("expected an assignment, got {:?}", other.variant()),
        }
        match &list.statements()[1] {
            Statement::Read(node) => assert!(node.target().is_error()),
            other => panic!("expected a read, got {:?}", other.variant()),
        }
        match &list.statements()[2] {
            Statement::Write(node) => assert!(node.value().is_error()),
            other => panic!("expected a write, got {:?}", other.variant()),
        }
        Ok(())
    }

    #[test]
    fn test_resolver_fails_on_dangling_scope() -> Pl0Result<()> {
        let mut other_unit = SymbolTable::new();
        let foreign = other_unit.push_scope(other_unit.root())?;
        let table = SymbolTable::new();
        let mut program = BlockNode::new(at(1), DeclList::default(), CallNode::new(at(1), "p").into(), foreign);

        let result = resolve_names(&mut program, &table);
        assert!(matches!(result, Err(Pl0Error::UnknownScope(1))));
        Ok(())
    }

    fn guarded_loop(program: &BlockNode) -> &DoNode {
        match program.body() {
            Statement::List(list) => match list.statements().last() {
                Some(Statement::Do(node)) => node,
                _ => panic!("guarded body should end in a do loop"),
            },
            other => panic!("expected a list, got {:?}", other.variant()),
        }
    }

    fn is_variable(exp: &ExpNode) -> bool {
        matches!(exp.kind(), ExpKind::Variable { .. })
    }

    #[test]
    fn test_resolver_rewrites_guards_in_branch_order() -> Pl0Result<()> {
        let mut sample = samples::build("guarded")?;
        let before: Vec<(String, bool)> = guarded_loop(&sample.program)
            .branches()
            .iter()
            .map(|b| (b.condition().to_string(), b.exit()))
            .collect();

        let diagnostics = resolve_names(&mut sample.program, &sample.table)?;
        assert!(diagnostics.is_empty());

        let node = guarded_loop(&sample.program);
        let after: Vec<(String, bool)> = node
            .branches()
            .iter()
            .map(|b| (b.condition().to_string(), b.exit()))
            .collect();
        assert_eq!(after, before);
        assert_eq!(node.branches().len(), 3);

        for branch in node.branches() {
            match branch.condition().kind() {
                ExpKind::Binary { left, right, .. } => {
                    assert!(is_variable(left) && is_variable(right), "guard {}", branch.condition());
                }
                other => panic!("expected a relation, got {:?}", other),
            }
        }
        match node.branches()[0].body() {
            Statement::Assignment(assign) => {
                assert!(assign.targets().iter().all(is_variable));
                assert!(matches!(assign.value(0).map(|v| v.kind()), Some(ExpKind::Binary { .. })));
            }
            other => panic!("expected an assignment, got {:?}", other.variant()),
        }
        match node.branches()[2].body() {
            Statement::Write(write) => assert!(is_variable(write.value())),
            other => panic!("expected a write, got {:?}", other.variant()),
        }
        Ok(())
    }

    #[test]
    fn test_folder_rewrites_one_guard() -> Pl0Result<()> {
        let mut statement: Statement = DoNode::new(
            at(1),
            vec![
                DoBranchNode::new(
                    at(1),
                    ExpNode::binary(at(1), BinaryOperator::Less, num(2), num(3)),
                    WriteNode::new(at(1), id("a")).into(),
                    false,
                ),
                DoBranchNode::new(
                    at(2),
                    ExpNode::binary(at(2), BinaryOperator::Greater, id("x"), num(0)),
                    AssignmentNode::single(at(2), id("x"), id("y")).into(),
                    true,
                ),
            ],
        )
        .into();

        let mut folder = ConstantFolder::new();
        statement.accept_mut(&mut folder)?;
        assert_eq!(folder.rewrites(), 1);

        let node = match &statement {
            Statement::Do(node) => node,
            other => panic!("expected a do loop, got {:?}", other.variant()),
        };
        assert_eq!(node.branches()[0].condition(), &num(1));
        assert!(!node.branches()[0].exit());
        assert_eq!(node.branches()[1].condition().to_string(), "(x > 0)");
        assert!(node.branches()[1].exit());
        assert_eq!(statement.render(0), "DO\n  1 THEN WRITE a\n  (x > 0) THEN x := y EXIT\nOD");
        Ok(())
    }

    #[test]
    fn test_resolver_recovers_scope_stack_after_failure() -> Pl0Result<()> {
        let mut other_unit = SymbolTable::new();
        let mut foreign = other_unit.root();
        for _ in 0..3 {
            foreign = other_unit.push_scope(foreign)?;
        }
        let outer_foreign = other_unit.parent(foreign)?.expect("nested scope has a parent");

        let mut table = SymbolTable::new();
        let root = table.root();
        let entry = table.define_procedure(root, "p", 1)?;

        // p's block points at a scope this table never created and declares
        // another such block, so the failure surfaces inside the procedure loop.
        let innermost = BlockNode::new(at(3), DeclList::default(), CallNode::new(at(3), "p").into(), foreign);
        let middle = BlockNode::new(
            at(2),
            DeclList::new(vec![ProcedureDecl::new(at(2), "q", entry, innermost)]),
            Statement::skip(at(2)),
            outer_foreign,
        );
        let mut program = BlockNode::new(
            at(1),
            DeclList::new(vec![ProcedureDecl::new(at(1), "p", entry, middle)]),
            Statement::skip(at(1)),
            root,
        );

        let mut resolver = NameResolver::new(&table);
        let result = program.accept_mut(&mut resolver);
        assert!(matches!(result, Err(Pl0Error::UnknownScope(3))));

        // Outside any block the resolver must fall back to the program scope.
        let mut call: Statement = CallNode::new(at(9), "p").into();
        call.accept_mut(&mut resolver)?;
        assert_eq!(resolver.resolved_calls(), 1);
        match &call {
            Statement::Call(node) => assert_eq!(node.entry(), Some(entry)),
            other => panic!("expected a call, got {:?}", other.variant()),
        }
        Ok(())
    }

    #[test]
    fn test_fold_expression() {
        let exp = ExpNode::binary(
            at(1),
            BinaryOperator::Add,
            ExpNode::binary(at(1), BinaryOperator::Mul, num(2), num(3)),
            num(1),
        );
        assert_eq!(folder::fold(&exp), Some(num(7)));

        let partial = ExpNode::binary(
            at(1),
            BinaryOperator::Add,
            id("x"),
            ExpNode::binary(at(1), BinaryOperator::Sub, num(5), num(2)),
        );
        let folded = folder::fold(&partial).expect("right operand folds");
        assert_eq!(folded.to_string(), "(x + 3)");

        assert_eq!(folder::fold(&id("x")), None);
        assert_eq!(folder::fold(&ExpNode::error(at(1))), None);
        let by_zero = ExpNode::binary(at(1), BinaryOperator::Div, num(1), num(0));
        assert_eq!(folder::fold(&by_zero), None);
    }

    #[test]
    fn test_folder_rewrites_slots_and_keeps_arity() -> Pl0Result<()> {
        let mut statement: Statement = AssignmentNode::new(
            at(1),
            vec![id("a"), id("b"), id("c")],
            vec![
                ExpNode::binary(at(1), BinaryOperator::Mul, num(4), num(5)),
                id("a"),
                ExpNode::binary(at(1), BinaryOperator::LessEqual, num(1), num(2)),
            ],
        )?
        .into();

        let mut folder = ConstantFolder::new();
        statement.accept_mut(&mut folder)?;
        assert_eq!(folder.rewrites(), 2);
        assert_eq!(statement.to_string(), "a, b, c := 20, a, 1");
        match &statement {
            Statement::Assignment(node) => assert_eq!(node.targets().len(), node.values().len()),
            other => panic!("expected an assignment, got {:?}", other.variant()),
        }
        Ok(())
    }

    #[test]
    fn test_folder_after_resolution() -> Pl0Result<()> {
        let mut sample = samples::build("nested")?;
        resolve_names(&mut sample.program, &sample.table)?;
        let mut folder = ConstantFolder::new();
        sample.program.accept_mut(&mut folder)?;

        assert_eq!(folder.rewrites(), 2);
        let text = sample.program.render(0);
        assert!(text.contains("WRITE 7"));
        assert!(text.contains("IF 1 THEN"));
        assert!(text.contains("n := 3"));
        Ok(())
    }

    #[test]
    fn test_folder_leaves_errors_alone() -> Pl0Result<()> {
        let mut sample = samples::build("broken")?;
        let mut folder = ConstantFolder::new();
        sample.program.accept_mut(&mut folder)?;

        assert_eq!(folder.rewrites(), 1);
        assert_eq!(
            sample.program.render(0),
            "\nBEGIN\n  SKIP;\n  ERROR;\n  WRITE x;\n  x := 2;\n  WHILE odd <error> DO\n    SKIP\nEND"
        );
        Ok(())
    }

    #[test]
    fn test_counter_on_samples() -> Pl0Result<()> {
        let broken = samples::build("broken")?;
        let mut counter = StatementCounter::new();
        broken.program.accept(&mut counter)?;
        assert_eq!(counter.executed(), 4);
        assert_eq!(counter.errors(), 1);
        assert_eq!(counter.visits(StatementVariant::While), 1);

        let guarded = samples::build("guarded")?;
        let mut counter = StatementCounter::new();
        guarded.program.accept(&mut counter)?;
        assert_eq!(counter.visits(StatementVariant::Do), 1);
        assert_eq!(counter.visits(StatementVariant::DoBranch), 3);
        assert_eq!(counter.executed(), 5);
        assert_eq!(counter.errors(), 0);

        let nested = samples::build("nested")?;
        let mut counter = StatementCounter::new();
        nested.program.accept(&mut counter)?;
        assert_eq!(counter.visits(StatementVariant::Block), 3);
        assert_eq!(counter.visits(StatementVariant::Call), 3);
        Ok(())
    }

    #[test]
    fn test_unknown_sample() {
        assert!(matches!(
            samples::build("nope"),
            Err(Pl0Error::CompilationError { .. })
        ));
    }
}
