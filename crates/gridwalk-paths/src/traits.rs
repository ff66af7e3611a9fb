use gridwalk_core::Point;

/// Read-only barrier oracle consulted by visibility tests and searches.
///
/// A cell listed in either set is impassable. Implementations must not be
/// mutated while a query is running.
pub trait BarrierMap {
    /// Whether `p` holds a fixed obstacle.
    fn contains_static_barrier(&self, p: Point) -> bool;

    /// Whether `p` holds a moving or temporary obstacle.
    fn contains_dynamic_barrier(&self, p: Point) -> bool;

    /// Whether `p` is blocked in either set.
    #[inline]
    fn is_blocked(&self, p: Point) -> bool {
        self.contains_static_barrier(p) || self.contains_dynamic_barrier(p)
    }
}

/// Barrier oracle that can also suggest a free cell near a blocked one.
pub trait NavMap: BarrierMap {
    /// Nearest free cell around `p`, or `None` if there is none within the
    /// map's search radius.
    fn find_substitute_position(&self, p: Point) -> Option<Point>;
}

impl<T: BarrierMap + ?Sized> BarrierMap for &T {
    #[inline]
    fn contains_static_barrier(&self, p: Point) -> bool {
        (**self).contains_static_barrier(p)
    }

    #[inline]
    fn contains_dynamic_barrier(&self, p: Point) -> bool {
        (**self).contains_dynamic_barrier(p)
    }

    #[inline]
    fn is_blocked(&self, p: Point) -> bool {
        (**self).is_blocked(p)
    }
}

impl<T: NavMap + ?Sized> NavMap for &T {
    #[inline]
    fn find_substitute_position(&self, p: Point) -> Option<Point> {
        (**self).find_substitute_position(p)
    }
}
