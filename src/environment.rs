use crate::object::Object;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// One scope of variable bindings. Scopes are shared: a function value keeps
/// the scope it was defined in alive for as long as the function lives.
#[derive(Debug, Default)]
pub struct Environment {
    store: HashMap<String, Object>,
    outer: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn new_shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new()))
    }
    pub fn new_enclosed(outer: Rc<RefCell<Environment>>) -> Self {
        Self {
            store: HashMap::new(),
            outer: Some(outer),
        }
    }
    /// Looks `name` up in this scope, then in the enclosing ones.
    pub fn get(&self, name: &str) -> Option<Object> {
        match self.store.get(name) {
            Some(obj) => Some(obj.clone()),
            None => self.outer.as_ref().and_then(|outer| outer.borrow().get(name)),
        }
    }
    /// Binds `name` in this scope only. An existing binding is replaced.
    pub fn set(&mut self, name: &str, value: Object) -> Object {
        self.store.insert(name.to_string(), value.clone());
        value
    }
}

#[cfg(test)]
mod tests {
    use crate::environment::Environment;
    use crate::object::Object;
    use std::rc::Rc;

    #[test]
    fn test_get_set() {
        let mut env = Environment::new();
        assert_eq!(env.get("a"), None);

        let value = env.set("a", Object::Integer { value: 1 });
        assert_eq!(value, Object::Integer { value: 1 });
        assert_eq!(env.get("a"), Some(Object::Integer { value: 1 }));

        env.set("a", Object::TRUE);
        assert_eq!(env.get("a"), Some(Object::TRUE));
    }

    #[test]
    fn test_enclosed_lookup() {
        let global = Environment::new_shared();
        global.borrow_mut().set("a", Object::Integer { value: 1 });
        global.borrow_mut().set("b", Object::Integer { value: 2 });

        let mut local = Environment::new_enclosed(Rc::clone(&global));
        local.set("b", Object::Integer { value: 20 });
        local.set("c", Object::Integer { value: 30 });

        assert_eq!(local.get("a"), Some(Object::Integer { value: 1 }));
        assert_eq!(local.get("b"), Some(Object::Integer { value: 20 }));
        assert_eq!(local.get("c"), Some(Object::Integer { value: 30 }));

        // set never writes through to the outer scope
        assert_eq!(global.borrow().get("b"), Some(Object::Integer { value: 2 }));
        assert_eq!(global.borrow().get("c"), None);
    }

    #[test]
    fn test_outer_is_shared() {
        let global = Environment::new_shared();
        let local = Environment::new_enclosed(Rc::clone(&global));
        assert_eq!(local.get("late"), None);

        global.borrow_mut().set("late", Object::string("bound"));
        assert_eq!(local.get("late"), Some(Object::string("bound")));
    }
}
