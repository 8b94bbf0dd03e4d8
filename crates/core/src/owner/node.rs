use dynscope_api::{OwnerRef, ScopeOwner, Value};
use smol_str::SmolStr;
use std::borrow::Cow;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

#[derive(Debug, Clone)]
struct Attribute {
    value: Value,
    writable: bool,
}

/// A declarative object with a fixed set of declared attributes.
///
/// Parents own their children; the child to parent link is weak, so a tree
/// is kept alive by its root alone. Writes succeed only on declared, writable
/// attributes; anything else is rejected and left to the next owner up.
pub struct ScopeNode {
    label: SmolStr,
    parent: Weak<ScopeNode>,
    children: RefCell<Vec<Rc<ScopeNode>>>,
    attrs: RefCell<HashMap<SmolStr, Attribute>>,
}

impl ScopeNode {
    pub fn root(label: impl Into<SmolStr>) -> Rc<Self> {
        Rc::new(Self::with_parent(label.into(), Weak::new()))
    }

    /// Create a node under `parent`, which takes ownership of it.
    pub fn child(label: impl Into<SmolStr>, parent: &Rc<ScopeNode>) -> Rc<Self> {
        let node = Rc::new(Self::with_parent(label.into(), Rc::downgrade(parent)));
        parent.children.borrow_mut().push(node.clone());
        node
    }

    fn with_parent(label: SmolStr, parent: Weak<ScopeNode>) -> Self {
        Self {
            label,
            parent,
            children: RefCell::new(Vec::new()),
            attrs: RefCell::new(HashMap::new()),
        }
    }

    /// Declare (or redeclare) a writable attribute.
    pub fn declare(&self, name: impl Into<SmolStr>, value: impl Into<Value>) {
        self.insert_attr(name.into(), value.into(), true);
    }

    /// Declare an attribute that rejects writes.
    pub fn declare_readonly(&self, name: impl Into<SmolStr>, value: impl Into<Value>) {
        self.insert_attr(name.into(), value.into(), false);
    }

    fn insert_attr(&self, name: SmolStr, value: Value, writable: bool) {
        self.attrs
            .borrow_mut()
            .insert(name, Attribute { value, writable });
    }

    pub fn attr(&self, name: &str) -> Option<Value> {
        self.attrs.borrow().get(name).map(|a| a.value.clone())
    }

    pub fn name(&self) -> &str {
        &self.label
    }

    pub fn parent_node(&self) -> Option<Rc<ScopeNode>> {
        self.parent.upgrade()
    }

    pub fn children(&self) -> Vec<Rc<ScopeNode>> {
        self.children.borrow().clone()
    }
}

impl ScopeOwner for ScopeNode {
    fn probe_get(&self, name: &str) -> Option<Value> {
        self.attr(name)
    }

    fn probe_set(&self, name: &str, value: Value) -> bool {
        match self.attrs.borrow_mut().get_mut(name) {
            Some(attr) if attr.writable => {
                attr.value = value;
                true
            }
            _ => false,
        }
    }

    fn parent(&self) -> Option<OwnerRef> {
        self.parent
            .upgrade()
            .map(|parent| parent as OwnerRef)
    }

    fn label(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.label.as_str())
    }
}

impl fmt::Debug for ScopeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeNode")
            .field("label", &self.label)
            .field("attrs", &self.attrs.borrow().keys().collect::<Vec<_>>())
            .field("children", &self.children.borrow().len())
            .finish()
    }
}
