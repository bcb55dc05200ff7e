use oxc_ast::ast::*;
use oxc_span::{GetSpan, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionLikeKind {
    Declaration,
    Expression,
    Arrow,
}

/// A top-level function or arrow function, viewed uniformly.
pub struct FunctionLike<'b, 'a> {
    pub name: String,
    pub kind: FunctionLikeKind,
    pub span: Span,
    pub params: &'b FormalParameters<'a>,
    pub this_param: Option<Span>,
    pub body: &'b FunctionBody<'a>,
    /// `(...) => expr` rather than `(...) => { ... }`.
    pub expression_body: bool,
}

impl<'b, 'a> FunctionLike<'b, 'a> {
    fn from_function(name: Option<String>, function: &'b Function<'a>, kind: FunctionLikeKind) -> Option<Self> {
        let body = function.body.as_deref()?;
        let name = name
            .or_else(|| function.id.as_ref().map(|id| id.name.to_string()))
            .unwrap_or_else(|| "default".to_string());
        Some(Self {
            name,
            kind,
            span: function.span,
            params: &function.params,
            this_param: function.this_param.as_ref().map(|p| p.span),
            body,
            expression_body: false,
        })
    }

    fn from_arrow(name: String, arrow: &'b ArrowFunctionExpression<'a>) -> Self {
        Self {
            name,
            kind: FunctionLikeKind::Arrow,
            span: arrow.span,
            params: &arrow.params,
            this_param: None,
            body: &arrow.body,
            expression_body: arrow.expression,
        }
    }

    /// Span of the returned expression of an expression-bodied arrow.
    pub fn expression_span(&self) -> Option<Span> {
        if !self.expression_body {
            return None;
        }
        match self.body.statements.first() {
            Some(Statement::ExpressionStatement(stmt)) => Some(stmt.expression.span()),
            _ => None,
        }
    }

    /// Spans of the parameter list in order, including `this` and the rest element.
    /// Returns the list and the offset of `params.items[0]` within it.
    pub fn parameter_spans(&self) -> (Vec<Span>, usize) {
        let mut spans = Vec::new();
        if let Some(this_param) = self.this_param {
            spans.push(this_param);
        }
        let offset = spans.len();
        spans.extend(self.params.items.iter().map(|p| p.span));
        if let Some(rest) = &self.params.rest {
            spans.push(rest.span);
        }
        (spans, offset)
    }
}

fn function_like_from_expression<'b, 'a>(
    name: String,
    expr: &'b Expression<'a>,
) -> Option<FunctionLike<'b, 'a>> {
    match expr {
        Expression::ArrowFunctionExpression(arrow) => Some(FunctionLike::from_arrow(name, arrow)),
        Expression::FunctionExpression(function) => {
            FunctionLike::from_function(Some(name), function, FunctionLikeKind::Expression)
        }
        Expression::ParenthesizedExpression(paren) => match &paren.expression {
            Expression::ArrowFunctionExpression(arrow) => Some(FunctionLike::from_arrow(name, arrow)),
            Expression::FunctionExpression(function) => {
                FunctionLike::from_function(Some(name), function, FunctionLikeKind::Expression)
            }
            _ => None,
        },
        _ => None,
    }
}

fn push_variable_functions<'b, 'a>(decl: &'b VariableDeclaration<'a>, out: &mut Vec<FunctionLike<'b, 'a>>) {
    for declarator in &decl.declarations {
        let BindingPatternKind::BindingIdentifier(id) = &declarator.id.kind else {
            continue;
        };
        if let Some(init) = &declarator.init {
            if let Some(function) = function_like_from_expression(id.name.to_string(), init) {
                out.push(function);
            }
        }
    }
}

/// Top-level function declarations and function-valued variable declarations,
/// including exported ones, in source order. Bodiless overloads are skipped.
pub fn collect_function_likes<'b, 'a>(program: &'b Program<'a>) -> Vec<FunctionLike<'b, 'a>> {
    let mut out = Vec::new();
    for stmt in &program.body {
        match stmt {
            Statement::FunctionDeclaration(function) => {
                out.extend(FunctionLike::from_function(None, function, FunctionLikeKind::Declaration));
            }
            Statement::VariableDeclaration(decl) => push_variable_functions(decl, &mut out),
            Statement::ExportNamedDeclaration(export_decl) => match &export_decl.declaration {
                Some(Declaration::FunctionDeclaration(function)) => {
                    out.extend(FunctionLike::from_function(None, function, FunctionLikeKind::Declaration));
                }
                Some(Declaration::VariableDeclaration(decl)) => push_variable_functions(decl, &mut out),
                _ => {}
            },
            Statement::ExportDefaultDeclaration(export_decl) => match &export_decl.declaration {
                ExportDefaultDeclarationKind::FunctionDeclaration(function) => {
                    out.extend(FunctionLike::from_function(None, function, FunctionLikeKind::Declaration));
                }
                ExportDefaultDeclarationKind::ArrowFunctionExpression(arrow) => {
                    out.push(FunctionLike::from_arrow("default".to_string(), arrow));
                }
                _ => {}
            },
            _ => {}
        }
    }
    out
}

/// Top-level class declarations, including exported ones, in source order.
pub fn collect_classes<'b, 'a>(program: &'b Program<'a>) -> Vec<&'b Class<'a>> {
    let mut out = Vec::new();
    for stmt in &program.body {
        match stmt {
            Statement::ClassDeclaration(class) => out.push(&**class),
            Statement::ExportNamedDeclaration(export_decl) => {
                if let Some(Declaration::ClassDeclaration(class)) = &export_decl.declaration {
                    out.push(&**class);
                }
            }
            Statement::ExportDefaultDeclaration(export_decl) => {
                if let ExportDefaultDeclarationKind::ClassDeclaration(class) = &export_decl.declaration {
                    out.push(&**class);
                }
            }
            _ => {}
        }
    }
    out
}

/// Constructor of a class, if it declares one.
pub fn class_constructor<'b, 'a>(class: &'b Class<'a>) -> Option<&'b Function<'a>> {
    class.body.body.iter().find_map(|element| match element {
        ClassElement::MethodDefinition(method) if method.kind == MethodDefinitionKind::Constructor => {
            Some(&*method.value)
        }
        _ => None,
    })
}
