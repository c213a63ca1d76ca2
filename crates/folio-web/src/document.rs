#![forbid(unsafe_code)]

//! Document-global attributes, with a write log for the host.

use std::cell::RefCell;
use std::collections::BTreeMap;

/// One attribute write, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeWrite {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Default)]
pub struct DocumentAttributes {
    current: RefCell<BTreeMap<String, String>>,
    log: RefCell<Vec<AttributeWrite>>,
}

impl DocumentAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, name: &str, value: &str) {
        self.current
            .borrow_mut()
            .insert(name.to_owned(), value.to_owned());
        self.log.borrow_mut().push(AttributeWrite {
            name: name.to_owned(),
            value: value.to_owned(),
        });
    }

    /// Current value of `name`.
    pub fn get(&self, name: &str) -> Option<String> {
        self.current.borrow().get(name).cloned()
    }

    /// Every value written to `name`, oldest first.
    pub fn history(&self, name: &str) -> Vec<String> {
        self.log
            .borrow()
            .iter()
            .filter(|w| w.name == name)
            .map(|w| w.value.clone())
            .collect()
    }

    /// Drain the write log. Current values are kept.
    pub fn take_writes(&self) -> Vec<AttributeWrite> {
        std::mem::take(&mut *self.log.borrow_mut())
    }
}
