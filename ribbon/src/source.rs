use core::fmt;
use core::marker::PhantomData;

use crate::Extent;

/// The ribbon's view of the host: it produces items by index, measures them, and receives
/// their positions.
///
/// The ribbon never asks for an index it still holds a record for, and never asks again for
/// an index that was refused (until the ribbon is reset).
pub trait ItemSource {
    type Item;

    /// Produces the item at `index`, or `None` when there is no item there. A `None` bounds
    /// the ribbon on that side.
    fn generate(&mut self, index: i64) -> Option<Self::Item>;

    /// Measures a freshly generated item. Called once per materialization, and again only
    /// through [`crate::Ribbon::remeasure`].
    fn measure(&mut self, index: i64, item: &Self::Item) -> Extent;

    /// Positions an item. `screen_pos` is relative to the viewport's start edge.
    fn place(&mut self, index: i64, item: &Self::Item, screen_pos: f64, selected: bool) {
        let _ = (index, item, screen_pos, selected);
    }

    /// Called when an item leaves the window (eviction or reset).
    fn release(&mut self, index: i64, item: Self::Item) {
        let _ = index;
        drop(item);
    }
}

/// An [`ItemSource`] built from a generator closure and a measurement closure.
///
/// See [`source_fn`].
pub struct FnSource<T, G, M> {
    generate: G,
    measure: M,
    _item: PhantomData<fn() -> T>,
}

/// Builds an [`ItemSource`] from closures. Items are positioned through
/// [`crate::Ribbon::for_each_placed_item`] rather than a `place` callback.
pub fn source_fn<T, G, M>(generate: G, measure: M) -> FnSource<T, G, M>
where
    G: FnMut(i64) -> Option<T>,
    M: FnMut(i64, &T) -> Extent,
{
    FnSource {
        generate,
        measure,
        _item: PhantomData,
    }
}

impl<T, G, M> ItemSource for FnSource<T, G, M>
where
    G: FnMut(i64) -> Option<T>,
    M: FnMut(i64, &T) -> Extent,
{
    type Item = T;

    fn generate(&mut self, index: i64) -> Option<T> {
        (self.generate)(index)
    }

    fn measure(&mut self, index: i64, item: &T) -> Extent {
        (self.measure)(index, item)
    }
}

impl<T, G, M> fmt::Debug for FnSource<T, G, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnSource(..)")
    }
}
