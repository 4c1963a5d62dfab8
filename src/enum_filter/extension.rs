//! Caller-supplied filter members.
//!
//! Extensions attach extra properties and methods to a [`Filter`]. A member is
//! a fixed JSON value, a method, or an accessor pair. Methods and accessors
//! receive the live filter as an explicit argument, so they can reach `map`,
//! `list`, constants, and other extensions at call time.
//!
//! Extensions are merged after the built-in members are installed and win on
//! name collisions, including `list`, `map` and constant names.

use crate::filter::Filter;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

pub type MethodFn = Arc<dyn Fn(&Filter, &[Value]) -> Value + Send + Sync>;
pub type GetterFn = Arc<dyn Fn(&Filter) -> Value + Send + Sync>;
pub type SetterFn = Arc<dyn Fn(&Filter, Value) + Send + Sync>;

/// A single extension member.
#[derive(Clone)]
pub enum Member {
    /// A fixed value.
    Value(Value),
    /// A callable taking the filter and positional JSON arguments.
    Method(MethodFn),
    /// A computed property. Either half may be absent.
    Accessor {
        get: Option<GetterFn>,
        set: Option<SetterFn>,
    },
}

impl Member {
    pub fn value(value: impl Into<Value>) -> Self {
        Member::Value(value.into())
    }

    pub fn method<F>(method: F) -> Self
    where
        F: Fn(&Filter, &[Value]) -> Value + Send + Sync + 'static,
    {
        Member::Method(Arc::new(method))
    }

    pub fn getter<G>(get: G) -> Self
    where
        G: Fn(&Filter) -> Value + Send + Sync + 'static,
    {
        Member::Accessor {
            get: Some(Arc::new(get)),
            set: None,
        }
    }

    pub fn accessor<G, S>(get: G, set: S) -> Self
    where
        G: Fn(&Filter) -> Value + Send + Sync + 'static,
        S: Fn(&Filter, Value) + Send + Sync + 'static,
    {
        Member::Accessor {
            get: Some(Arc::new(get)),
            set: Some(Arc::new(set)),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Member::Value(_) => "value",
            Member::Method(_) => "method",
            Member::Accessor { .. } => "accessor",
        }
    }
}

impl fmt::Debug for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Member::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Member::Method(_) => f.write_str("Method(..)"),
            Member::Accessor { get, set } => f
                .debug_struct("Accessor")
                .field("get", &get.is_some())
                .field("set", &set.is_some())
                .finish(),
        }
    }
}

/// An ordered set of named members. Inserting an existing name replaces it.
#[derive(Clone, Default, Debug)]
pub struct Extensions {
    members: Vec<(String, Member)>,
}

impl Extensions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, member: Member) -> Self {
        self.insert(name, member);
        self
    }

    pub fn value(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with(name, Member::value(value))
    }

    pub fn method<F>(self, name: impl Into<String>, method: F) -> Self
    where
        F: Fn(&Filter, &[Value]) -> Value + Send + Sync + 'static,
    {
        self.with(name, Member::method(method))
    }

    pub fn getter<G>(self, name: impl Into<String>, get: G) -> Self
    where
        G: Fn(&Filter) -> Value + Send + Sync + 'static,
    {
        self.with(name, Member::getter(get))
    }

    pub fn accessor<G, S>(self, name: impl Into<String>, get: G, set: S) -> Self
    where
        G: Fn(&Filter) -> Value + Send + Sync + 'static,
        S: Fn(&Filter, Value) + Send + Sync + 'static,
    {
        self.with(name, Member::accessor(get, set))
    }

    /// Inserts a member, returning the one it replaced.
    pub fn insert(&mut self, name: impl Into<String>, member: Member) -> Option<Member> {
        let name = name.into();
        match self.members.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, member)),
            None => {
                self.members.push((name, member));
                None
            }
        }
    }

    /// Merges `other` into `self`; members of `other` win.
    pub fn merge(&mut self, other: Extensions) {
        for (name, member) in other.members {
            self.insert(name, member);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Member> {
        self.members
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, member)| member)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Source of the extensions merged onto a new filter.
pub enum External {
    /// A ready-made member set.
    Members(Extensions),
    /// Called once during construction with the partially built filter
    /// (map, value map, list and constants in place, no extensions yet).
    Factory(Box<dyn FnOnce(&Filter) -> Extensions + Send>),
}

impl External {
    pub fn factory<F>(factory: F) -> Self
    where
        F: FnOnce(&Filter) -> Extensions + Send + 'static,
    {
        External::Factory(Box::new(factory))
    }

    pub(crate) fn resolve(self, filter: &Filter) -> Extensions {
        match self {
            External::Members(members) => members,
            External::Factory(factory) => factory(filter),
        }
    }
}

impl From<Extensions> for External {
    fn from(members: Extensions) -> Self {
        External::Members(members)
    }
}

impl fmt::Debug for External {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            External::Members(members) => f.debug_tuple("Members").field(members).finish(),
            External::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}
