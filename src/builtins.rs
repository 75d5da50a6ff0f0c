use crate::object::{Builtin, Object};
use once_cell::sync::Lazy;
use std::collections::HashMap;

static BUILTINS: Lazy<HashMap<&'static str, Builtin>> = Lazy::new(|| {
    let builtins = [
        Builtin { name: "len", func: len },
        Builtin {
            name: "first",
            func: first,
        },
        Builtin { name: "last", func: last },
        Builtin { name: "rest", func: rest },
        Builtin { name: "push", func: push },
        Builtin { name: "puts", func: puts },
    ];
    builtins.iter().map(|b| (b.name, *b)).collect()
});

/// Builtins are consulted only after the environment chain, so a `let` may
/// shadow them.
pub fn lookup(name: &str) -> Option<Builtin> {
    BUILTINS.get(name).copied()
}

fn wrong_number_of_arguments(got: usize, want: usize) -> Object {
    Object::error(format!(
        "wrong number of arguments. got={}, want={}",
        got, want
    ))
}

fn array_argument<'a>(name: &str, args: &'a [Object]) -> Result<&'a [Object], Object> {
    if args.len() != 1 {
        return Err(wrong_number_of_arguments(args.len(), 1));
    }
    match &args[0] {
        Object::Array { elements } => Ok(elements.as_slice()),
        other => Err(Object::error(format!(
            "argument to `{}` must be ARRAY, got {}",
            name,
            other.r#type()
        ))),
    }
}

fn len(args: &[Object]) -> Object {
    if args.len() != 1 {
        return wrong_number_of_arguments(args.len(), 1);
    }
    match &args[0] {
        Object::String { value } => Object::Integer {
            value: value.chars().count() as i64,
        },
        Object::Array { elements } => Object::Integer {
            value: elements.len() as i64,
        },
        other => Object::error(format!(
            "argument to `len` not supported, got {}",
            other.r#type()
        )),
    }
}

fn first(args: &[Object]) -> Object {
    match array_argument("first", args) {
        Ok(elements) => elements.first().cloned().unwrap_or(Object::Null),
        Err(err) => err,
    }
}

fn last(args: &[Object]) -> Object {
    match array_argument("last", args) {
        Ok(elements) => elements.last().cloned().unwrap_or(Object::Null),
        Err(err) => err,
    }
}

fn rest(args: &[Object]) -> Object {
    match array_argument("rest", args) {
        Ok([]) => Object::Null,
        Ok([_, tail @ ..]) => Object::array(tail.to_vec()),
        Err(err) => err,
    }
}

fn push(args: &[Object]) -> Object {
    if args.len() != 2 {
        return wrong_number_of_arguments(args.len(), 2);
    }
    match &args[0] {
        Object::Array { elements } => {
            let mut elements = elements.to_vec();
            elements.push(args[1].clone());
            Object::array(elements)
        }
        other => Object::error(format!(
            "argument to `push` must be ARRAY, got {}",
            other.r#type()
        )),
    }
}

fn puts(args: &[Object]) -> Object {
    for arg in args {
        println!("{}", arg);
    }
    Object::Null
}

#[cfg(test)]
mod tests {
    use crate::builtins::lookup;
    use crate::object::Object;

    fn int(value: i64) -> Object {
        Object::Integer { value }
    }

    fn call(name: &str, args: &[Object]) -> Object {
        let builtin = lookup(name).unwrap_or_else(|| panic!("no builtin named {}", name));
        (builtin.func)(args)
    }

    #[test]
    fn test_lookup() {
        for name in ["len", "first", "last", "rest", "push", "puts"] {
            assert_eq!(lookup(name).map(|b| b.name), Some(name));
        }
        assert!(lookup("print").is_none());
    }

    #[test]
    fn test_len() {
        let tests = vec![
            (vec![Object::string("")], int(0)),
            (vec![Object::string("four")], int(4)),
            (vec![Object::string("héllo")], int(5)),
            (vec![Object::array(vec![int(1), int(2)])], int(2)),
            (
                vec![int(1)],
                Object::error("argument to `len` not supported, got INTEGER"),
            ),
            (
                vec![Object::string("one"), Object::string("two")],
                Object::error("wrong number of arguments. got=2, want=1"),
            ),
        ];
        for (args, expected) in tests {
            assert_eq!(call("len", &args), expected);
        }
    }

    #[test]
    fn test_array_builtins() {
        let arr = Object::array(vec![int(1), int(2), int(3)]);
        let empty = Object::array(vec![]);
        let tests = vec![
            ("first", vec![arr.clone()], int(1)),
            ("first", vec![empty.clone()], Object::Null),
            ("last", vec![arr.clone()], int(3)),
            ("last", vec![empty.clone()], Object::Null),
            ("rest", vec![arr.clone()], Object::array(vec![int(2), int(3)])),
            ("rest", vec![empty.clone()], Object::Null),
            (
                "push",
                vec![empty.clone(), int(9)],
                Object::array(vec![int(9)]),
            ),
            (
                "first",
                vec![int(1)],
                Object::error("argument to `first` must be ARRAY, got INTEGER"),
            ),
            (
                "push",
                vec![int(1), int(1)],
                Object::error("argument to `push` must be ARRAY, got INTEGER"),
            ),
            (
                "push",
                vec![arr.clone()],
                Object::error("wrong number of arguments. got=1, want=2"),
            ),
        ];
        for (name, args, expected) in tests {
            assert_eq!(call(name, &args), expected, "{}({:?})", name, args);
        }
    }

    #[test]
    fn test_push_does_not_mutate() {
        let arr = Object::array(vec![int(1)]);
        let pushed = call("push", &[arr.clone(), int(2)]);
        assert_eq!(arr, Object::array(vec![int(1)]));
        assert_eq!(pushed, Object::array(vec![int(1), int(2)]));
    }

    #[test]
    fn test_puts_returns_null() {
        assert_eq!(call("puts", &[Object::string("hello")]), Object::Null);
    }
}
