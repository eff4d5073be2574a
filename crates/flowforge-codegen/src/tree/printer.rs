// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Deterministic serializer for the artifact syntax tree.
//!
//! Output shape is fixed: four-space indentation, one blank line between
//! members, annotations each on their own line. Identical trees print to
//! identical text, which the generation pipeline depends on for
//! reproducible artifacts.

use super::nodes::{
    Annotation, CompilationUnit, Expr, Field, Member, Method, Param, Stmt, TypeRef,
};

const INDENT: &str = "    ";

/// Serialize a compilation unit to source text.
pub fn print_unit(unit: &CompilationUnit) -> String {
    let mut out = String::new();

    if let Some(package) = &unit.package {
        out.push_str("package ");
        out.push_str(package);
        out.push_str(";\n\n");
    }
    for import in &unit.imports {
        out.push_str("import ");
        out.push_str(import);
        out.push_str(";\n");
    }
    if !unit.imports.is_empty() {
        out.push('\n');
    }

    if let Some(decl) = &unit.type_decl {
        for annotation in &decl.annotations {
            out.push_str(&render_annotation(annotation));
            out.push('\n');
        }
        for modifier in &decl.modifiers {
            out.push_str(modifier);
            out.push(' ');
        }
        out.push_str("class ");
        out.push_str(&decl.name);
        out.push_str(" {\n");

        for member in &decl.members {
            out.push('\n');
            match member {
                Member::Field(field) => print_field(&mut out, field),
                Member::Method(method) => print_method(&mut out, method),
            }
        }

        out.push_str("}\n");
    }

    out
}

fn print_field(out: &mut String, field: &Field) {
    for annotation in &field.annotations {
        out.push_str(INDENT);
        out.push_str(&render_annotation(annotation));
        out.push('\n');
    }
    out.push_str(INDENT);
    for modifier in &field.modifiers {
        out.push_str(modifier);
        out.push(' ');
    }
    out.push_str(&render_type(&field.ty));
    out.push(' ');
    out.push_str(&field.name);
    if let Some(init) = &field.init {
        out.push_str(" = ");
        out.push_str(&render_expr(init));
    }
    out.push_str(";\n");
}

fn print_method(out: &mut String, method: &Method) {
    for annotation in &method.annotations {
        out.push_str(INDENT);
        out.push_str(&render_annotation(annotation));
        out.push('\n');
    }
    out.push_str(INDENT);
    for modifier in &method.modifiers {
        out.push_str(modifier);
        out.push(' ');
    }
    out.push_str(&render_type(&method.return_ty));
    out.push(' ');
    out.push_str(&method.name);
    out.push('(');
    let params: Vec<String> = method.params.iter().map(render_param).collect();
    out.push_str(&params.join(", "));
    out.push_str(") {\n");
    for stmt in &method.body {
        print_stmt(out, stmt, 2);
    }
    out.push_str(INDENT);
    out.push_str("}\n");
}

fn print_stmt(out: &mut String, stmt: &Stmt, level: usize) {
    let pad = INDENT.repeat(level);
    match stmt {
        Stmt::Expr(expr) => {
            out.push_str(&pad);
            out.push_str(&render_expr(expr));
            out.push_str(";\n");
        }
        Stmt::Local { ty, name, init } => {
            out.push_str(&pad);
            out.push_str(&render_type(ty));
            out.push(' ');
            out.push_str(name);
            if let Some(init) = init {
                out.push_str(" = ");
                out.push_str(&render_expr(init));
            }
            out.push_str(";\n");
        }
        Stmt::If { cond, then } => {
            out.push_str(&pad);
            out.push_str("if (");
            out.push_str(&render_expr(cond));
            out.push_str(") {\n");
            for inner in then {
                print_stmt(out, inner, level + 1);
            }
            out.push_str(&pad);
            out.push_str("}\n");
        }
        Stmt::Return(expr) => {
            out.push_str(&pad);
            match expr {
                Some(expr) => {
                    out.push_str("return ");
                    out.push_str(&render_expr(expr));
                    out.push_str(";\n");
                }
                None => out.push_str("return;\n"),
            }
        }
    }
}

/// Render a statement sequence at top level, one statement per line.
///
/// Consumers of the node-visitor framework use this to splice emitted
/// construction statements into a larger artifact body.
pub fn render_statements(stmts: &[Stmt]) -> String {
    let mut out = String::new();
    for stmt in stmts {
        print_stmt(&mut out, stmt, 0);
    }
    out
}

fn render_annotation(annotation: &Annotation) -> String {
    match &annotation.value {
        Some(value) => format!("@{}({})", annotation.name, render_expr(value)),
        None => format!("@{}", annotation.name),
    }
}

fn render_param(param: &Param) -> String {
    let mut out = String::new();
    for annotation in &param.annotations {
        out.push_str(&render_annotation(annotation));
        out.push(' ');
    }
    out.push_str(&render_type(&param.ty));
    out.push(' ');
    out.push_str(&param.name);
    out
}

/// Render a type reference, including generic arguments.
pub fn render_type(ty: &TypeRef) -> String {
    if ty.type_args.is_empty() {
        return ty.name.clone();
    }
    let args: Vec<String> = ty.type_args.iter().map(render_type).collect();
    format!("{}<{}>", ty.name, args.join(", "))
}

/// Render an expression to source text.
pub fn render_expr(expr: &Expr) -> String {
    match expr {
        Expr::Name(name) => name.clone(),
        Expr::Str(value) => format!("\"{}\"", escape(value)),
        Expr::StrList(items) => {
            let rendered: Vec<String> = items
                .iter()
                .map(|item| format!("\"{}\"", escape(item)))
                .collect();
            format!("{{{}}}", rendered.join(", "))
        }
        Expr::Bool(value) => value.to_string(),
        Expr::Int(value) => value.to_string(),
        Expr::Long(value) => format!("{}L", value),
        Expr::Null => "null".to_string(),
        Expr::Call(call) => {
            let args: Vec<String> = call.args.iter().map(render_expr).collect();
            match &call.receiver {
                Some(receiver) => {
                    format!("{}.{}({})", render_expr(receiver), call.name, args.join(", "))
                }
                None => format!("{}({})", call.name, args.join(", ")),
            }
        }
        Expr::Cast { ty, expr } => format!("({}) {}", render_type(ty), render_expr(expr)),
        Expr::New(ty) => format!("new {}()", render_type(ty)),
        Expr::Eq(lhs, rhs) => format!("{} == {}", render_expr(lhs), render_expr(rhs)),
    }
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::parser;

    #[test]
    fn test_print_round_trips_through_parser() {
        let source = r#"
            package demo;
            import demo.OrderModel;
            @Path("/Order")
            public class OrderResource {
                Process<OrderModel> process;
                @GET
                @Produces(MediaType.APPLICATION_JSON)
                public OrderModelOutput getResource_Order(@PathParam("id") String id) {
                    ProcessInstance<OrderModel> pi = process.instances().findById(id).orElse(null);
                    if (pi == null) {
                        return null;
                    }
                    return getModel(pi);
                }
            }
        "#;
        let unit = parser::parse(source).unwrap();
        let printed = print_unit(&unit);
        let reparsed = parser::parse(&printed).unwrap();
        assert_eq!(unit, reparsed, "printing must preserve tree structure");

        let reprinted = print_unit(&reparsed);
        assert_eq!(printed, reprinted, "printing must be a fixed point");
    }

    #[test]
    fn test_render_expr_forms() {
        assert_eq!(render_expr(&Expr::Null), "null");
        assert_eq!(render_expr(&Expr::Long(5_000_000_000)), "5000000000L");
        assert_eq!(render_expr(&Expr::str("a \"b\"")), "\"a \\\"b\\\"\"");
        assert_eq!(
            render_expr(&Expr::Cast {
                ty: TypeRef::new("demo.Order"),
                expr: Box::new(Expr::name("value")),
            }),
            "(demo.Order) value"
        );
    }

    #[test]
    fn test_render_statements_for_visitor_output() {
        let stmts = vec![
            Stmt::Local {
                ty: TypeRef::new("StartNodeFactory"),
                name: "startNode1".to_string(),
                init: Some(Expr::Call(super::super::nodes::CallExpr::on(
                    "factory",
                    "startNode",
                    vec![Expr::Long(1)],
                ))),
            },
            Stmt::Expr(Expr::Call(super::super::nodes::CallExpr::on(
                "startNode1",
                "done",
                vec![],
            ))),
        ];
        let rendered = render_statements(&stmts);
        assert_eq!(
            rendered,
            "StartNodeFactory startNode1 = factory.startNode(1L);\nstartNode1.done();\n"
        );
    }
}
