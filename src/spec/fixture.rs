//! Lazily evaluated, per-example memoized fixtures.
//!
//! A [`Let`] is a clonable handle to a factory. Resolution goes through the
//! example's scope, which owns the memo storage: the first access within an
//! example constructs and memoizes the value, later accesses return the same
//! `Rc`, and the store is dropped with the scope when the example ends, so
//! no fixture state ever crosses sibling examples. Because resolution needs
//! a `&mut Scope`, a fixture cannot be accessed outside an example at all.
//!
//! Factories receive the scope, so one fixture may resolve another; each
//! link of such a chain is memoized independently within the example.

use std::any::Any;
use std::collections::HashMap;
use std::rc::Rc;

use crate::spec::example::Scope;

pub struct Let<T> {
    inner: Rc<LetInner<T>>,
}

struct LetInner<T> {
    factory: Box<dyn Fn(&mut Scope) -> T>,
}

impl<T> Clone for Let<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: 'static> Let<T> {
    pub(crate) fn new(factory: impl Fn(&mut Scope) -> T + 'static) -> Self {
        Self {
            inner: Rc::new(LetInner {
                factory: Box::new(factory),
            }),
        }
    }

    pub(crate) fn from_nullary(factory: impl Fn() -> T + 'static) -> Self {
        Self::new(move |_scope| factory())
    }

    /// Returns the memoized value for the current example, constructing it
    /// on first access.
    pub fn resolve(&self, scope: &mut Scope) -> Rc<T> {
        // The handle's allocation address identifies the memo slot; distinct
        // fixtures can never collide while the spec tree is alive.
        let key = Rc::as_ptr(&self.inner) as usize;
        if let Some(memoized) = scope.memo.get::<T>(key) {
            return memoized;
        }
        // Constructed outside any borrow of the store, so the factory may
        // resolve other fixtures through the same scope.
        let value = Rc::new((self.inner.factory)(scope));
        scope.memo.insert(key, value.clone());
        value
    }
}

/// Type-erased memo slots owned by one example's scope.
pub(crate) struct MemoStore {
    slots: HashMap<usize, Rc<dyn Any>>,
}

impl MemoStore {
    pub(crate) fn new() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }

    pub(crate) fn get<T: 'static>(&self, key: usize) -> Option<Rc<T>> {
        let slot = self.slots.get(&key)?;
        Rc::clone(slot).downcast::<T>().ok()
    }

    pub(crate) fn insert<T: 'static>(&mut self, key: usize, value: Rc<T>) {
        let erased: Rc<dyn Any> = value;
        self.slots.insert(key, erased);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn resolution_memoizes_within_one_store() {
        let built = Rc::new(Cell::new(0));
        let counter = built.clone();
        let fixture = Let::from_nullary(move || {
            counter.set(counter.get() + 1);
            42
        });

        let mut scope = Scope::new();
        let first = fixture.resolve(&mut scope);
        let second = fixture.resolve(&mut scope);
        assert_eq!(*first, 42);
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(built.get(), 1);
    }

    #[test]
    fn a_fresh_store_reconstructs_the_value() {
        let built = Rc::new(Cell::new(0));
        let counter = built.clone();
        let fixture = Let::from_nullary(move || {
            counter.set(counter.get() + 1);
            Cell::new(0)
        });

        let mut first_scope = Scope::new();
        fixture.resolve(&mut first_scope).set(99);
        drop(first_scope);

        let mut second_scope = Scope::new();
        let value = fixture.resolve(&mut second_scope);
        assert_eq!(value.get(), 0);
        assert_eq!(built.get(), 2);
    }

    #[test]
    fn chained_fixtures_resolve_through_the_same_scope() {
        let base = Let::from_nullary(|| 21);
        let doubled = {
            let base = base.clone();
            Let::new(move |scope| *base.resolve(scope) * 2)
        };

        let mut scope = Scope::new();
        assert_eq!(*doubled.resolve(&mut scope), 42);
        // The chain memoized the base link too.
        assert_eq!(*base.resolve(&mut scope), 21);
    }
}
