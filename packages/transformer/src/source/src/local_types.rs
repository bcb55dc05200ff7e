use super::type_names::type_name_text;
use oxc_ast::ast::*;
use oxc_span::Span;
use std::collections::HashMap;

/// An object-shaped type declared in the same file: `interface Props { ... }` or
/// `type Props = { ... }`.
pub struct LocalType<'b, 'a> {
    pub name: String,
    pub members: &'b [TSSignature<'a>],
    pub span: Span,
}

#[derive(Default)]
pub struct LocalTypes<'b, 'a> {
    types: HashMap<String, LocalType<'b, 'a>>,
    order: Vec<String>,
}

impl<'b, 'a> LocalTypes<'b, 'a> {
    pub fn from_program(program: &'b Program<'a>) -> Self {
        let mut types = Self::default();
        for stmt in &program.body {
            match stmt {
                Statement::TSInterfaceDeclaration(decl) => types.add_interface(decl),
                Statement::TSTypeAliasDeclaration(decl) => types.add_alias(decl),
                Statement::ExportNamedDeclaration(export_decl) => match &export_decl.declaration {
                    Some(Declaration::TSInterfaceDeclaration(decl)) => types.add_interface(decl),
                    Some(Declaration::TSTypeAliasDeclaration(decl)) => types.add_alias(decl),
                    _ => {}
                },
                _ => {}
            }
        }
        types
    }

    fn add_interface(&mut self, decl: &'b TSInterfaceDeclaration<'a>) {
        self.insert(LocalType {
            name: decl.id.name.to_string(),
            members: &decl.body.body,
            span: decl.body.span,
        });
    }

    fn add_alias(&mut self, decl: &'b TSTypeAliasDeclaration<'a>) {
        if let TSType::TSTypeLiteral(literal) = &decl.type_annotation {
            self.insert(LocalType {
                name: decl.id.name.to_string(),
                members: &literal.members,
                span: literal.span,
            });
        }
    }

    fn insert(&mut self, local: LocalType<'b, 'a>) {
        // Declaration merging of interfaces is not followed: the first one wins.
        if !self.types.contains_key(&local.name) {
            self.order.push(local.name.clone());
            self.types.insert(local.name.clone(), local);
        }
    }

    pub fn get(&self, name: &str) -> Option<&LocalType<'b, 'a>> {
        self.types.get(name)
    }

    pub fn resolve(&self, name: &TSTypeName) -> Option<&LocalType<'b, 'a>> {
        self.get(&type_name_text(name)?)
    }

    /// Declared types in source order.
    pub fn iter(&self) -> impl Iterator<Item = &LocalType<'b, 'a>> {
        self.order.iter().filter_map(|name| self.types.get(name))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
