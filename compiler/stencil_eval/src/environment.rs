//! Variable lookup for one render.
//!
//! Uses a scope stack over the caller's property map. The caller's map is
//! never modified: `#set` writes go to the scope stack, so one
//! `PropertyMap` can back many renders.

use rustc_hash::FxHashMap;

use crate::{PropertyMap, Value};

#[derive(Debug)]
pub struct Environment<'p> {
    properties: &'p PropertyMap,
    /// Innermost scope last. The first scope holds top-level `#set` bindings
    /// and is never popped.
    scopes: Vec<FxHashMap<String, Value>>,
}

impl<'p> Environment<'p> {
    pub fn new(properties: &'p PropertyMap) -> Self {
        Environment {
            properties,
            scopes: vec![FxHashMap::default()],
        }
    }

    /// Innermost binding first, then the property map.
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name))
            .or_else(|| self.properties.get(name))
    }

    /// `#set`: rebinds the innermost scope that already has `name`, otherwise
    /// the outermost scope, so assignments inside a loop outlive the loop.
    pub fn assign(&mut self, name: &str, value: Value) {
        let index = self
            .scopes
            .iter()
            .rposition(|scope| scope.contains_key(name))
            .unwrap_or(0);
        if let Some(scope) = self.scopes.get_mut(index) {
            scope.insert(name.to_owned(), value);
        }
    }

    /// Bind in the innermost scope (loop variables).
    pub fn bind(&mut self, name: &str, value: Value) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_owned(), value);
        }
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }
}
