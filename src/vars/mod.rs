// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.


//! The macro variable store.
//!
//! Variable numbers are resolved in the order local, common, system.  Local
//! variables (`#1` to `#33`) live in one table per macro nesting level, where
//! a modal macro call (G66) brings its own table that is created once and
//! entered for every block it applies to.  Common variables are shared by
//! all levels.  System variables are bound to fields of the controller
//! state.

mod error;
mod system;

use std::ops::RangeInclusive;
use tracing::debug;

pub use self::error::*;
pub use self::system::*;

/// Value of a variable that has never been written.
pub const NULL_VALUE: f64 = f64::MIN;

/// Highest local variable number.
pub const LOCAL_MAX: u16 = 33;

/// Read and write access to variables by number.
pub trait Variables {
    /// Return the value of the variable, or `None` if no namespace owns `id`.
    fn read(&self, id: u16) -> Option<f64>;
    fn write(&mut self, id: u16, value: f64) -> Result<(), VariableError>;
}

#[derive(Clone, Debug, PartialEq)]
pub struct StoreConfig {
    /// Number of local and modal levels on top of the base level.
    pub max_depth: usize,
    /// Number ranges of the common variables.
    pub common: Vec<RangeInclusive<u16>>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig { max_depth: 5, common: vec![100..=199, 500..=999] }
    }
}

#[derive(Clone, Debug)]
struct Table {
    first: u16,
    values: Vec<f64>,
}

impl Table {
    fn new(range: RangeInclusive<u16>) -> Self {
        let len = range.end().saturating_sub(*range.start()) as usize + 1;
        Table { first: *range.start(), values: vec![NULL_VALUE; len] }
    }

    fn local() -> Self {
        Table::new(0..=LOCAL_MAX)
    }

    /// A local table preloaded with call arguments.
    fn with_args(args: impl IntoIterator<Item = (u16, f64)>) -> Result<Self, VariableError> {
        let mut table = Table::local();
        for (id, value) in args {
            if id == 0 || id > LOCAL_MAX {
                return Err(VariableError::InvalidArgument(id));
            }
            table.values[id as usize] = value;
        }
        Ok(table)
    }

    fn index(&self, id: u16) -> Option<usize> {
        let index = id.checked_sub(self.first)? as usize;
        if index < self.values.len() { Some(index) } else { None }
    }

    fn get(&self, id: u16) -> Option<f64> {
        self.index(id).map(|i| self.values[i])
    }

    fn set(&mut self, id: u16, value: f64) -> bool {
        match self.index(id) {
            Some(i) => { self.values[i] = value; true }
            None => false,
        }
    }
}

/// Handle of the table that currently answers local variable numbers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Scope {
    Local(usize),
    Modal(usize),
}

/// Variable storage with nested local levels, see the module docs.
#[derive(Clone, Debug)]
pub struct VariableStore {
    max_depth: usize,
    locals: Vec<Table>,
    modals: Vec<Table>,
    /// Modal levels that have been created but are not entered.
    pending: Vec<usize>,
    /// Modal levels that are currently entered.
    entered: Vec<usize>,
    /// Stack of local views; never empty.
    view: Vec<Scope>,
    common: Vec<Table>,
    system: SystemParameters,
}

impl Default for VariableStore {
    fn default() -> Self {
        Self::new(StoreConfig::default(), SystemParameters::default())
    }
}

impl VariableStore {
    pub fn new(config: StoreConfig, system: SystemParameters) -> Self {
        VariableStore {
            max_depth: config.max_depth,
            locals: vec![Table::local()],
            modals: Vec::new(),
            pending: Vec::new(),
            entered: Vec::new(),
            view: vec![Scope::Local(0)],
            common: config.common.into_iter().map(Table::new).collect(),
            system,
        }
    }

    pub fn system(&self) -> &SystemParameters {
        &self.system
    }

    pub fn system_mut(&mut self) -> &mut SystemParameters {
        &mut self.system
    }

    /// Number of local levels above the base level.
    pub fn local_depth(&self) -> usize {
        self.locals.len() - 1
    }

    /// Number of modal levels that exist, entered or not.
    pub fn modal_depth(&self) -> usize {
        self.modals.len()
    }

    /// Whether the current local view is a modal level.
    pub fn in_modal_level(&self) -> bool {
        matches!(self.view.last(), Some(Scope::Modal(_)))
    }

    fn check_capacity(&self) -> Result<(), VariableError> {
        if self.locals.len() + self.modals.len() > self.max_depth {
            Err(VariableError::ScopeOverflow(self.max_depth))
        } else {
            Ok(())
        }
    }

    /// Push a local level for a macro call, with the call arguments.
    pub fn enter_level(&mut self, args: impl IntoIterator<Item = (u16, f64)>)
                       -> Result<(), VariableError> {
        self.check_capacity()?;
        let table = Table::with_args(args)?;
        self.locals.push(table);
        self.view.push(Scope::Local(self.locals.len() - 1));
        debug!(depth = self.local_depth(), "entered local level");
        Ok(())
    }

    /// Pop the local level of a returning macro.
    pub fn exit_level(&mut self) -> Result<(), VariableError> {
        let top = self.locals.len() - 1;
        if top == 0 {
            return Err(VariableError::ScopeUnderflow);
        }
        if self.view.last() != Some(&Scope::Local(top)) {
            return Err(VariableError::ScopeMismatch);
        }
        self.view.pop();
        self.locals.pop();
        debug!(depth = self.local_depth(), "left local level");
        Ok(())
    }

    /// Create the local table of a modal macro call.
    pub fn create_modal_level(&mut self, args: impl IntoIterator<Item = (u16, f64)>)
                              -> Result<(), VariableError> {
        self.check_capacity()?;
        let table = Table::with_args(args)?;
        self.modals.push(table);
        self.pending.push(self.modals.len() - 1);
        debug!(depth = self.modal_depth(), "created modal level");
        Ok(())
    }

    /// Drop the most recently created modal level, which must not be entered.
    pub fn delete_modal_level(&mut self) -> Result<(), VariableError> {
        let top = self.modals.len().checked_sub(1).ok_or(VariableError::NoModalLevel)?;
        if self.pending.last() != Some(&top) {
            return Err(VariableError::ScopeMismatch);
        }
        self.pending.pop();
        self.modals.pop();
        debug!(depth = self.modal_depth(), "deleted modal level");
        Ok(())
    }

    /// Make the most recently created modal level the current local view.
    pub fn enter_modal_level(&mut self) -> Result<(), VariableError> {
        let index = self.pending.pop().ok_or(VariableError::NoModalLevel)?;
        self.entered.push(index);
        self.view.push(Scope::Modal(index));
        debug!(index, "entered modal level");
        Ok(())
    }

    /// Return to the local view that was current before entering.
    pub fn exit_modal_level(&mut self) -> Result<(), VariableError> {
        let index = *self.entered.last().ok_or(VariableError::NoModalLevel)?;
        if self.view.last() != Some(&Scope::Modal(index)) {
            return Err(VariableError::ScopeMismatch);
        }
        self.entered.pop();
        self.view.pop();
        self.pending.push(index);
        debug!(index, "left modal level");
        Ok(())
    }

    fn current(&self) -> &Table {
        match self.view.last() {
            Some(Scope::Modal(i)) => &self.modals[*i],
            Some(Scope::Local(i)) => &self.locals[*i],
            None => &self.locals[0],
        }
    }

    fn current_mut(&mut self) -> &mut Table {
        match self.view.last() {
            Some(Scope::Modal(i)) => &mut self.modals[*i],
            Some(Scope::Local(i)) => &mut self.locals[*i],
            None => &mut self.locals[0],
        }
    }
}

impl Variables for VariableStore {
    fn read(&self, id: u16) -> Option<f64> {
        if id <= LOCAL_MAX {
            return self.current().get(id);
        }
        if let Some(value) = self.common.iter().find_map(|table| table.get(id)) {
            return Some(value);
        }
        SystemVariable::from_id(id).map(|var| self.system.get(var))
    }

    fn write(&mut self, id: u16, value: f64) -> Result<(), VariableError> {
        if id == 0 {
            return Err(VariableError::ReadOnly(id));
        }
        if id <= LOCAL_MAX {
            self.current_mut().set(id, value);
        } else if let Some(table) = self.common.iter_mut().find(|table| table.index(id).is_some()) {
            table.set(id, value);
        } else if let Some(var) = SystemVariable::from_id(id) {
            debug!(id, %var, value, "system variable written");
            self.system.set(var, value);
            return Ok(());
        } else {
            return Err(VariableError::UnknownVariable(id));
        }
        debug!(id, value, "variable written");
        Ok(())
    }
}
