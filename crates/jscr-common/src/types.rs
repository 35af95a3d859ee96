use serde::Serialize;

/// The numeric tag identifying a [`Type`]'s shape, matching the runtime's
/// fixed uid assignment.
pub mod uid {
    pub const ARRAY: u16 = 0;
    pub const DYNAMIC: u16 = 1;
    pub const OBJECT: u16 = 2;
    pub const VOID: u16 = 3;
    pub const BOOL: u16 = 4;
    pub const INT: u16 = 5;
    pub const FLOAT: u16 = 6;
    pub const DOUBLE: u16 = 7;
    pub const STRING: u16 = 8;
    pub const CHAR: u16 = 9;
}

/// A declared type: a primitive, an array of some element type, an object
/// type named by identifier, or any of those decorated as a lambda/function
/// type carrying parameter types.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Type {
    pub uid: u16,
    /// Non-empty only for `object` types; holds the object's name.
    pub data: String,
    /// The element type; present only when `uid == uid::ARRAY`.
    pub child: Option<Box<Type>>,
    /// Parameter types when this type is decorated as a lambda/function
    /// type. Empty otherwise. A type is a lambda iff this is non-empty.
    pub lambda_types: Vec<Type>,
}

impl Type {
    fn new(uid: u16, data: impl Into<String>, child: Option<Type>) -> Self {
        Self {
            uid,
            data: data.into(),
            child: child.map(Box::new),
            lambda_types: Vec::new(),
        }
    }

    pub fn array(of: Type) -> Self {
        Self::new(uid::ARRAY, "", Some(of))
    }

    pub fn dynamic() -> Self {
        Self::new(uid::DYNAMIC, "", None)
    }

    pub fn object(name: impl Into<String>) -> Self {
        Self::new(uid::OBJECT, name, None)
    }

    pub fn void() -> Self {
        Self::new(uid::VOID, "", None)
    }

    pub fn bool() -> Self {
        Self::new(uid::BOOL, "", None)
    }

    pub fn int() -> Self {
        Self::new(uid::INT, "", None)
    }

    pub fn float() -> Self {
        Self::new(uid::FLOAT, "", None)
    }

    pub fn double() -> Self {
        Self::new(uid::DOUBLE, "", None)
    }

    pub fn string() -> Self {
        Self::new(uid::STRING, "", None)
    }

    pub fn char() -> Self {
        Self::new(uid::CHAR, "", None)
    }

    pub fn is_lambda(&self) -> bool {
        !self.lambda_types.is_empty()
    }

    /// Returns a copy of this type decorated with the given lambda parameter
    /// types.
    pub fn with_lambda_types(mut self, lambda_types: Vec<Type>) -> Self {
        self.lambda_types = lambda_types;
        self
    }

    /// Look up a primitive type by its registered name.
    fn primitive_from_name(name: &str) -> Option<Type> {
        match name {
            "dynamic" => Some(Type::dynamic()),
            "void" => Some(Type::void()),
            "bool" => Some(Type::bool()),
            "int" => Some(Type::int()),
            "float" => Some(Type::float()),
            "double" => Some(Type::double()),
            "string" => Some(Type::string()),
            "char" => Some(Type::char()),
            _ => None,
        }
    }

    /// Resolve a type name, stripping any trailing `[]` array markers
    /// (recursively) before falling back to an object type for anything not
    /// in the primitive registry.
    pub fn from_name(name: &str) -> Type {
        let trimmed = name.trim().replace(' ', "");
        if let Some(elem) = trimmed.strip_suffix("[]") {
            return Type::array(Type::from_name(elem));
        }
        Type::primitive_from_name(&trimmed).unwrap_or_else(|| Type::object(trimmed))
    }

    /// True iff `name` matches a primitive type in the registry (used by the
    /// lexer to decide whether an identifier should be a `TYPE` token).
    pub fn is_primitive_name(name: &str) -> bool {
        Type::primitive_from_name(name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_names_round_trip() {
        assert_eq!(Type::from_name("int"), Type::int());
        assert_eq!(Type::from_name("string"), Type::string());
    }

    #[test]
    fn unknown_name_becomes_object() {
        assert_eq!(Type::from_name("Point"), Type::object("Point"));
    }

    #[test]
    fn array_suffix_wraps_element_type() {
        let t = Type::from_name("int[]");
        assert_eq!(t.uid, uid::ARRAY);
        assert_eq!(*t.child.unwrap(), Type::int());
    }

    #[test]
    fn nested_array_suffix_is_recursive() {
        let t = Type::from_name("int[][]");
        assert_eq!(t.uid, uid::ARRAY);
        let inner = *t.child.unwrap();
        assert_eq!(inner.uid, uid::ARRAY);
        assert_eq!(*inner.child.unwrap(), Type::int());
    }

    #[test]
    fn is_primitive_name_matches_registry_only() {
        assert!(Type::is_primitive_name("bool"));
        assert!(!Type::is_primitive_name("Point"));
        assert!(!Type::is_primitive_name("array"));
    }

    #[test]
    fn is_lambda_iff_lambda_types_nonempty() {
        let t = Type::int();
        assert!(!t.is_lambda());
        let t = t.with_lambda_types(vec![Type::int(), Type::string()]);
        assert!(t.is_lambda());
    }

    #[test]
    fn type_equality_is_structural() {
        let a = Type::array(Type::int());
        let b = Type::array(Type::int());
        assert_eq!(a, b);
        assert_ne!(a, Type::array(Type::float()));
    }
}
