use crate::options::MarkerNames;
use crate::source::{render_interface_reference, slice, type_name_last};
use oxc_ast::ast::TSType;
use oxc_span::GetSpan;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerArgument {
    /// Canonical interface name, e.g. `Repository<User>`.
    Interface(String),
    /// Source text of an argument that is not a plain interface reference.
    Unresolvable(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marker {
    Required(MarkerArgument),
    Optional(MarkerArgument),
}

impl Marker {
    pub fn new(argument: MarkerArgument, optional: bool) -> Self {
        if optional {
            Marker::Optional(argument)
        } else {
            Marker::Required(argument)
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, Marker::Optional(_))
    }

    pub fn argument(&self) -> &MarkerArgument {
        match self {
            Marker::Required(argument) | Marker::Optional(argument) => argument,
        }
    }

    pub fn interface_name(&self) -> Option<&str> {
        match self.argument() {
            MarkerArgument::Interface(name) => Some(name),
            MarkerArgument::Unresolvable(_) => None,
        }
    }

    /// Spelling of the marker for messages: `InjectOptional<A | B>`.
    pub fn describe(&self, names: &MarkerNames) -> String {
        let wrapper = if self.is_optional() {
            &names.inject_optional
        } else {
            &names.inject
        };
        let argument = match self.argument() {
            MarkerArgument::Interface(name) => name.as_str(),
            MarkerArgument::Unresolvable(text) => text.as_str(),
        };
        format!("{}<{}>", wrapper, argument)
    }
}

/// The marker carried by `ty`, if `ty` is a reference to one of the marker names
/// (plain or namespace-qualified).
pub fn marker_of(ty: &TSType, names: &MarkerNames, text: &str) -> Option<Marker> {
    let TSType::TSTypeReference(reference) = ty else {
        return None;
    };
    let name = type_name_last(&reference.type_name)?;
    let optional = if name == names.inject_optional {
        true
    } else if name == names.inject {
        false
    } else {
        return None;
    };

    let argument = match reference.type_arguments.as_deref() {
        Some(args) if args.params.len() == 1 => {
            let param = &args.params[0];
            match render_interface_reference(param) {
                Some(interface) => MarkerArgument::Interface(interface),
                None => MarkerArgument::Unresolvable(slice(text, param.span()).to_string()),
            }
        }
        Some(args) => MarkerArgument::Unresolvable(slice(text, args.span).to_string()),
        None => MarkerArgument::Unresolvable(String::new()),
    };

    Some(Marker::new(argument, optional))
}
