//! Union-find (disjoint set union) over arbitrary hashable values.
//!
//! Elements live in a flat arena and refer to their parents by index, so the
//! self-referential parent links of a classic union-find become plain integer
//! updates. `find` performs two-pass path compression and `union` attaches the
//! smaller tree beneath the larger one, which together give amortised
//! near-constant-time operations.
//!
//! The structure is single-writer: `find` mutates parent links even though it
//! never changes the observable partition, so it borrows the set mutably.

use std::{
    borrow::Borrow,
    collections::{HashMap, TryReserveError},
    fmt,
    hash::Hash,
};

use crate::error::{DisjointSetError, Result};

/// Opaque reference to an element registered in a [`DisjointSet`].
///
/// Handles are plain arena indices. They are cheap to copy and compare, but
/// are only meaningful for the set that issued them.
///
/// # Examples
/// ```
/// use djset_core::DisjointSet;
///
/// let mut set = DisjointSet::new();
/// let handle = set.make_set("alpha").expect("first registration succeeds");
/// assert_eq!(set.value(handle), Some(&"alpha"));
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ElementHandle(usize);

impl ElementHandle {
    /// Returns the arena index backing this handle.
    #[must_use]
    #[rustfmt::skip]
    pub const fn index(self) -> usize { self.0 }
}

impl fmt::Display for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug)]
struct Element<T> {
    value: T,
    parent: usize,
    size: usize,
}

/// Disjoint-set forest keyed by value.
///
/// # Examples
/// ```
/// use djset_core::DisjointSet;
///
/// let mut set = DisjointSet::new();
/// for name in ["ada", "grace", "edsger"] {
///     set.make_set(name).expect("names are distinct");
/// }
/// let ada = set.find("ada").expect("registered");
/// let grace = set.find("grace").expect("registered");
/// let root = set.union(ada, grace).expect("both are roots");
///
/// assert_eq!(set.find("grace").expect("registered"), root);
/// assert_eq!(set.set_count(), 2);
/// assert_eq!(set.set_size("ada").expect("registered"), 2);
/// ```
#[derive(Clone, Debug)]
pub struct DisjointSet<T> {
    elements: Vec<Element<T>>,
    registry: HashMap<T, ElementHandle>,
    sets: usize,
}

impl<T> Default for DisjointSet<T> {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
            registry: HashMap::new(),
            sets: 0,
        }
    }
}

impl<T> DisjointSet<T> {
    /// Number of registered elements.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.elements.len() }

    /// Returns `true` when no element has been registered.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.elements.is_empty() }

    /// Number of disjoint sets currently held.
    #[must_use]
    #[rustfmt::skip]
    pub fn set_count(&self) -> usize { self.sets }

    /// Returns the value registered under `handle`, if the handle is known.
    #[must_use]
    pub fn value(&self, handle: ElementHandle) -> Option<&T> {
        self.elements.get(handle.0).map(|element| &element.value)
    }

    /// Returns the size of the set rooted at `root`.
    ///
    /// # Errors
    /// Returns [`DisjointSetError::UnknownHandle`] for a foreign handle and
    /// [`DisjointSetError::NotARoot`] when `root` has a parent.
    pub fn root_size(&self, root: ElementHandle) -> Result<usize> {
        let element = self.element(root)?;
        if element.parent != root.0 {
            return Err(DisjointSetError::NotARoot { index: root.0 });
        }
        Ok(element.size)
    }

    /// Returns the representative of the set containing `handle`,
    /// compressing the path walked to reach it.
    ///
    /// # Errors
    /// Returns [`DisjointSetError::UnknownHandle`] for a foreign handle.
    pub fn find_root(&mut self, handle: ElementHandle) -> Result<ElementHandle> {
        self.element(handle)?;
        Ok(ElementHandle(self.compress(handle.0)))
    }

    /// Merges the sets rooted at `root1` and `root2` and returns the new root.
    ///
    /// The root of the smaller set is attached beneath the root of the larger
    /// set, which absorbs its size. When both sets have the same size `root1`
    /// is attached beneath `root2`. Passing the same root twice leaves the
    /// forest untouched and returns that root.
    ///
    /// # Errors
    /// Returns [`DisjointSetError::UnknownHandle`] for a foreign handle and
    /// [`DisjointSetError::NotARoot`] when either handle is not a root; call
    /// [`Self::find`] or [`Self::find_root`] first.
    pub fn union(&mut self, root1: ElementHandle, root2: ElementHandle) -> Result<ElementHandle> {
        let first_size = self.root_size(root1)?;
        let second_size = self.root_size(root2)?;
        if root1 == root2 {
            return Ok(root1);
        }

        let (parent, child) = if first_size > second_size {
            (root1, root2)
        } else {
            (root2, root1)
        };

        // Both indices were validated by `root_size` above.
        if let Some(element) = self.elements.get_mut(child.0) {
            element.parent = parent.0;
        }
        if let Some(element) = self.elements.get_mut(parent.0) {
            element.size = first_size.saturating_add(second_size);
        }
        self.sets = self.sets.saturating_sub(1);
        Ok(parent)
    }

    fn element(&self, handle: ElementHandle) -> Result<&Element<T>> {
        self.elements
            .get(handle.0)
            .ok_or(DisjointSetError::UnknownHandle {
                index: handle.0,
                len: self.elements.len(),
            })
    }

    fn parent_of(&self, index: usize) -> usize {
        self.elements.get(index).map_or(index, |element| element.parent)
    }

    /// Locates the root of `start` and repoints every node on the way at it.
    fn compress(&mut self, start: usize) -> usize {
        let mut root = start;
        loop {
            let parent = self.parent_of(root);
            if parent == root {
                break;
            }
            root = parent;
        }

        let mut node = start;
        while node != root {
            let next = self.parent_of(node);
            if let Some(element) = self.elements.get_mut(node) {
                element.parent = root;
            }
            node = next;
        }

        root
    }
}

impl<T> DisjointSet<T>
where
    T: Eq + Hash + Clone + fmt::Debug,
{
    /// Creates an empty disjoint set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty disjoint set with room for `capacity` elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elements: Vec::with_capacity(capacity),
            registry: HashMap::with_capacity(capacity),
            sets: 0,
        }
    }

    /// Creates an empty disjoint set with room for `capacity` elements,
    /// reporting allocation failure instead of aborting.
    ///
    /// # Errors
    /// Returns [`TryReserveError`] when the arena or registry for `capacity`
    /// elements cannot be allocated.
    pub fn try_with_capacity(capacity: usize) -> core::result::Result<Self, TryReserveError> {
        let mut set = Self::new();
        set.elements.try_reserve_exact(capacity)?;
        set.registry.try_reserve(capacity)?;
        Ok(set)
    }

    /// Registers `value` as a new singleton set.
    ///
    /// # Errors
    /// Returns [`DisjointSetError::DuplicateElement`] if `value` is already
    /// registered. The existing registration is left untouched.
    pub fn make_set(&mut self, value: T) -> Result<ElementHandle> {
        if self.registry.contains_key(&value) {
            return Err(DisjointSetError::duplicate_element(&value));
        }
        let handle = ElementHandle(self.elements.len());
        self.registry.insert(value.clone(), handle);
        self.elements.push(Element {
            value,
            parent: handle.0,
            size: 1,
        });
        self.sets = self.sets.saturating_add(1);
        Ok(handle)
    }

    /// Returns `true` when `value` has been registered.
    #[must_use]
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.registry.contains_key(value)
    }

    /// Returns the handle `value` was registered under, without following
    /// parent links.
    #[must_use]
    pub fn handle_of<Q>(&self, value: &Q) -> Option<ElementHandle>
    where
        T: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.registry.get(value).copied()
    }

    /// Returns the representative (root) of the set containing `value`.
    ///
    /// Every node visited on the way to the root is repointed directly at it.
    /// This flattens later lookups but never changes which set an element
    /// belongs to, so repeated calls without an intervening [`Self::union`]
    /// return the same root.
    ///
    /// # Errors
    /// Returns [`DisjointSetError::UnknownElement`] if `value` was never
    /// registered.
    pub fn find<Q>(&mut self, value: &Q) -> Result<ElementHandle>
    where
        T: Borrow<Q>,
        Q: Eq + Hash + fmt::Debug + ?Sized,
    {
        let handle = self
            .handle_of(value)
            .ok_or_else(|| DisjointSetError::unknown_element(&value))?;
        Ok(ElementHandle(self.compress(handle.0)))
    }

    /// Returns `true` when `left` and `right` belong to the same set.
    ///
    /// # Errors
    /// Returns [`DisjointSetError::UnknownElement`] if either value was never
    /// registered.
    pub fn same_set<Q>(&mut self, left: &Q, right: &Q) -> Result<bool>
    where
        T: Borrow<Q>,
        Q: Eq + Hash + fmt::Debug + ?Sized,
    {
        Ok(self.find(left)? == self.find(right)?)
    }

    /// Returns the number of elements in the set containing `value`.
    ///
    /// # Errors
    /// Returns [`DisjointSetError::UnknownElement`] if `value` was never
    /// registered.
    pub fn set_size<Q>(&mut self, value: &Q) -> Result<usize>
    where
        T: Borrow<Q>,
        Q: Eq + Hash + fmt::Debug + ?Sized,
    {
        let root = self.find(value)?;
        self.root_size(root)
    }
}
