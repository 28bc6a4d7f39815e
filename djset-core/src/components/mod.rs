//! Connected-component labelling driven by a stream of pairwise relations.
//!
//! Every universe element is registered up front; each relation then merges
//! the sets of its endpoints unless they already share a root. The resulting
//! labels induce exactly the equivalence relation "connected by some chain of
//! relations". Which element ends up representing a component depends on the
//! union order and is not part of the contract.

use std::{borrow::Borrow, collections::HashMap, fmt, hash::Hash};

use tracing::{Span, debug, field, instrument};

use crate::{
    disjoint_set::{DisjointSet, ElementHandle},
    error::{DisjointSetError, Result},
};

/// Identifier shared by all elements of one connected component.
///
/// Identifiers are stable within a single [`ComponentLabels`] snapshot only.
///
/// # Examples
/// ```
/// use djset_core::label_components;
///
/// let labels = label_components(["a", "b", "c"], [("a", "b")]).expect("known elements");
/// assert_eq!(labels.component_of("a"), labels.component_of("b"));
/// assert_ne!(labels.component_of("a"), labels.component_of("c"));
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ComponentId(ElementHandle);

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "component-{}", self.0.index())
    }
}

/// Component membership reported for one universe element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment<T> {
    element: T,
    component: ComponentId,
    representative: T,
    component_size: usize,
}

impl<T> Assignment<T> {
    /// Returns the labelled element.
    #[must_use]
    #[rustfmt::skip]
    pub fn element(&self) -> &T { &self.element }

    /// Returns the component the element belongs to.
    #[must_use]
    #[rustfmt::skip]
    pub fn component(&self) -> ComponentId { self.component }

    /// Returns the value currently representing the component.
    #[must_use]
    #[rustfmt::skip]
    pub fn representative(&self) -> &T { &self.representative }

    /// Returns the number of elements in the component.
    #[must_use]
    #[rustfmt::skip]
    pub fn component_size(&self) -> usize { self.component_size }
}

/// Snapshot of component labels in universe order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentLabels<T> {
    assignments: Vec<Assignment<T>>,
    component_count: usize,
}

impl<T> ComponentLabels<T> {
    /// Returns one assignment per universe element, in universe order.
    #[must_use]
    #[rustfmt::skip]
    pub fn assignments(&self) -> &[Assignment<T>] { &self.assignments }

    /// Returns the number of distinct components.
    #[must_use]
    #[rustfmt::skip]
    pub fn component_count(&self) -> usize { self.component_count }

    /// Groups elements by component, ordering groups and their members by
    /// first appearance in the universe.
    #[must_use]
    pub fn groups(&self) -> Vec<Vec<&T>> {
        let mut slots: HashMap<ComponentId, usize> = HashMap::new();
        let mut groups: Vec<Vec<&T>> = Vec::new();
        for assignment in &self.assignments {
            let slot = *slots.entry(assignment.component).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            if let Some(group) = groups.get_mut(slot) {
                group.push(&assignment.element);
            }
        }
        groups
    }
}

impl<T: Eq> ComponentLabels<T> {
    /// Returns the component of `element`, or `None` if it is not part of the
    /// labelled universe.
    #[must_use]
    pub fn component_of<Q>(&self, element: &Q) -> Option<ComponentId>
    where
        T: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.assignments
            .iter()
            .find(|assignment| Borrow::<Q>::borrow(&assignment.element) == element)
            .map(|assignment| assignment.component)
    }
}

/// Incrementally merges a fixed universe of elements into components.
///
/// # Examples
/// ```
/// use djset_core::ComponentLabeler;
///
/// let mut labeler = ComponentLabeler::new(["A", "B", "C", "D"]).expect("distinct universe");
/// assert!(labeler.relate("A", "B").expect("known"));
/// assert!(labeler.relate("C", "D").expect("known"));
/// assert!(!labeler.relate("B", "A").expect("known"));
///
/// let labels = labeler.labels().expect("forest is consistent");
/// assert_eq!(labels.component_count(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct ComponentLabeler<T> {
    set: DisjointSet<T>,
    universe: Vec<ElementHandle>,
}

impl<T> ComponentLabeler<T>
where
    T: Eq + Hash + Clone + fmt::Debug,
{
    /// Registers every element of `universe` as its own component.
    ///
    /// # Errors
    /// Returns [`crate::DisjointSetError::DuplicateElement`] if the universe
    /// repeats a value.
    pub fn new(universe: impl IntoIterator<Item = T>) -> Result<Self> {
        let universe = universe.into_iter();
        let mut set = DisjointSet::with_capacity(universe.size_hint().0);
        let universe = universe
            .map(|element| set.make_set(element))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { set, universe })
    }

    /// Number of elements in the universe.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.universe.len() }

    /// Returns `true` when the universe is empty.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.universe.is_empty() }

    /// Number of components formed so far.
    #[must_use]
    #[rustfmt::skip]
    pub fn component_count(&self) -> usize { self.set.set_count() }

    /// Records that `left` and `right` are connected.
    ///
    /// Returns `true` when the relation merged two components and `false`
    /// when both elements were already connected.
    ///
    /// # Errors
    /// Returns [`crate::DisjointSetError::UnknownElement`] if either element
    /// is outside the universe.
    pub fn relate<Q>(&mut self, left: &Q, right: &Q) -> Result<bool>
    where
        T: Borrow<Q>,
        Q: Eq + Hash + fmt::Debug + ?Sized,
    {
        let left_root = self.set.find(left)?;
        let right_root = self.set.find(right)?;
        if left_root == right_root {
            return Ok(false);
        }
        self.set.union(left_root, right_root)?;
        Ok(true)
    }

    /// Applies `relations` in order and returns how many of them merged two
    /// components.
    ///
    /// # Errors
    /// Stops at the first relation naming an element outside the universe and
    /// returns [`crate::DisjointSetError::UnknownElement`]. Relations applied
    /// before the failure remain in effect.
    pub fn relate_all<I, R>(&mut self, relations: I) -> Result<usize>
    where
        I: IntoIterator<Item = (R, R)>,
        R: Borrow<T>,
    {
        let mut merges = 0_usize;
        for (left, right) in relations {
            let (left, right): (&T, &T) = (left.borrow(), right.borrow());
            if self.relate(left, right)? {
                merges = merges.saturating_add(1);
            }
        }
        Ok(merges)
    }

    /// Produces the current labels for every universe element.
    ///
    /// Takes `&mut self` because resolving roots compresses paths.
    ///
    /// # Errors
    /// Returns [`DisjointSetError::UnknownHandle`] if a universe handle is
    /// missing from the forest. That only happens if the forest has been
    /// corrupted, which would be a logic error in this crate.
    pub fn labels(&mut self) -> Result<ComponentLabels<T>> {
        let mut assignments = Vec::with_capacity(self.universe.len());
        for &handle in &self.universe {
            let root = self.set.find_root(handle)?;
            let component_size = self.set.root_size(root)?;
            let element = self.value_at(handle)?;
            let representative = self.value_at(root)?;
            assignments.push(Assignment {
                element,
                component: ComponentId(root),
                representative,
                component_size,
            });
        }
        Ok(ComponentLabels {
            assignments,
            component_count: self.set.set_count(),
        })
    }

    fn value_at(&self, handle: ElementHandle) -> Result<T> {
        self.set
            .value(handle)
            .cloned()
            .ok_or(DisjointSetError::UnknownHandle {
                index: handle.index(),
                len: self.set.len(),
            })
    }
}

/// Labels the connected components of `universe` under `relations`.
///
/// # Errors
/// Returns [`crate::DisjointSetError::DuplicateElement`] if the universe
/// repeats a value and [`crate::DisjointSetError::UnknownElement`] if a
/// relation names an element outside the universe.
///
/// # Examples
/// ```
/// use djset_core::label_components;
///
/// let labels = label_components(
///     ["A", "B", "C", "D"],
///     [("A", "B"), ("C", "D")],
/// )
/// .expect("all elements are known");
/// assert_eq!(labels.component_count(), 2);
/// assert_eq!(labels.groups(), vec![vec![&"A", &"B"], vec![&"C", &"D"]]);
/// ```
#[instrument(
    name = "core.label_components",
    err,
    skip_all,
    fields(universe = field::Empty, relations = field::Empty),
)]
pub fn label_components<T, I, R>(
    universe: impl IntoIterator<Item = T>,
    relations: I,
) -> Result<ComponentLabels<T>>
where
    T: Eq + Hash + Clone + fmt::Debug,
    I: IntoIterator<Item = (R, R)>,
    R: Borrow<T>,
{
    let mut labeler = ComponentLabeler::new(universe)?;
    let span = Span::current();
    span.record("universe", field::display(labeler.len()));

    let relations: Vec<(R, R)> = relations.into_iter().collect();
    span.record("relations", field::display(relations.len()));
    let merges = labeler.relate_all(relations)?;

    let labels = labeler.labels()?;
    debug!(
        merges,
        components = labels.component_count(),
        "component labelling completed"
    );
    Ok(labels)
}
