//! Scoped symbol table
//!
//! A stack of scopes mapping names to the declaration that introduced them.
//! The table always has at least the root (layer) scope.

use crate::ast::{ExprId, StmtId};
use log::{trace, warn};
use std::collections::HashMap;

/// A declared name: the declaring statement and its identifier node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol {
    pub decl: StmtId,
    pub ident: ExprId,
}

#[derive(Debug)]
pub struct SymbolTable {
    scopes: Vec<HashMap<String, Symbol>>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            scopes: vec![HashMap::new()], // Root scope
        }
    }

    /// Enter a new scope
    pub fn push_scope(&mut self) {
        self.scopes.push(HashMap::new());
        trace!("enter scope, depth {}", self.depth());
    }

    /// Exit current scope, dropping its symbols
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
            trace!("exit scope, depth {}", self.depth());
        } else {
            warn!("attempt to pop the root scope ignored");
        }
    }

    /// Number of open scopes
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Look up a name, innermost scope first
    pub fn lookup(&self, name: &str) -> Option<Symbol> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name).copied())
    }

    pub fn exists_in_current_scope(&self, name: &str) -> bool {
        self.scopes
            .last()
            .is_some_and(|scope| scope.contains_key(name))
    }

    /// Declare a name in the current scope. Returns false if the current
    /// scope already has it; outer declarations may be shadowed.
    pub fn declare(&mut self, name: &str, symbol: Symbol) -> bool {
        match self.scopes.last_mut() {
            Some(scope) if !scope.contains_key(name) => {
                scope.insert(name.to_string(), symbol);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbol(n: u32) -> Symbol {
        Symbol {
            decl: StmtId::from_raw(n),
            ident: ExprId::from_raw(n),
        }
    }

    #[test]
    fn test_scoped_lookup() {
        let mut table = SymbolTable::new();
        assert!(table.declare("global", symbol(0)));

        table.push_scope();
        assert!(table.declare("local", symbol(1)));
        assert_eq!(table.lookup("global"), Some(symbol(0)));
        assert_eq!(table.lookup("local"), Some(symbol(1)));

        table.pop_scope();
        assert_eq!(table.lookup("global"), Some(symbol(0)));
        assert_eq!(table.lookup("local"), None);
    }

    #[test]
    fn test_shadowing() {
        let mut table = SymbolTable::new();
        table.declare("x", symbol(0));
        table.push_scope();
        assert!(!table.exists_in_current_scope("x"));
        assert!(table.declare("x", symbol(1)));
        assert_eq!(table.lookup("x"), Some(symbol(1)));
        table.pop_scope();
        assert_eq!(table.lookup("x"), Some(symbol(0)));
    }

    #[test]
    fn test_duplicate_in_same_scope() {
        let mut table = SymbolTable::new();
        assert!(table.declare("x", symbol(0)));
        assert!(!table.declare("x", symbol(1)));
        assert_eq!(table.lookup("x"), Some(symbol(0)));
    }

    #[test]
    fn test_root_scope_is_never_popped() {
        let mut table = SymbolTable::new();
        table.declare("x", symbol(0));
        table.pop_scope();
        assert_eq!(table.depth(), 1);
        assert_eq!(table.lookup("x"), Some(symbol(0)));
    }
}
