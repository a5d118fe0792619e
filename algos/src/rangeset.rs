//! Interval-coalescing ordered set of disjoint, non-adjacent closed ranges,
//! backed by an arena red-black tree.
//!
//! Classical exact backward search keeps a single contiguous suffix-array
//! range per step. Degenerate matching can fragment one range into many
//! sub-ranges per step, and later steps frequently re-merge fragments that
//! land next to each other. The tree keeps each step proportional to the
//! number of surviving distinct runs instead of the raw candidate count.
//!
//! Nodes live in a `Vec` arena and are addressed by index. Slot 0 is the
//! shared `nil` leaf and slot 1 a root header whose left child is the real
//! root, so rotations and fixups run one uniform code path with no special
//! cases for the root or missing children.

use crate::Range;

const NIL: u32 = 0;
const HEAD: u32 = 1;

#[derive(Debug, Clone)]
struct Node<T> {
    entry: T,
    red: bool,
    left: u32,
    right: u32,
    parent: u32,
}

impl<T: Default> Node<T> {
    fn sentinel() -> Self {
        Node {
            entry: T::default(),
            red: false,
            left: NIL,
            right: NIL,
            parent: NIL,
        }
    }
}

/// Red-black tree over an arena of nodes. Stores entries in `(Ord)` order
/// and exposes the node-level operations the coalescing [`RangeSet`] needs
/// on top of plain insertion.
#[derive(Debug, Clone)]
pub struct RbTree<T> {
    nodes: Vec<Node<T>>,
    free: Vec<u32>,
    len: usize,
}

impl<T: Copy + Ord + Default> RbTree<T> {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::sentinel(), Node::sentinel()],
            free: Vec::new(),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.nodes[HEAD as usize].left == NIL
    }

    fn root(&self) -> u32 {
        self.nodes[HEAD as usize].left
    }

    fn entry(&self, i: u32) -> T {
        self.nodes[i as usize].entry
    }

    fn set_entry(&mut self, i: u32, entry: T) {
        self.nodes[i as usize].entry = entry;
    }

    fn left(&self, i: u32) -> u32 {
        self.nodes[i as usize].left
    }

    fn right(&self, i: u32) -> u32 {
        self.nodes[i as usize].right
    }

    fn parent(&self, i: u32) -> u32 {
        self.nodes[i as usize].parent
    }

    fn red(&self, i: u32) -> bool {
        self.nodes[i as usize].red
    }

    fn set_red(&mut self, i: u32, red: bool) {
        self.nodes[i as usize].red = red;
    }

    fn alloc(&mut self, entry: T) -> u32 {
        match self.free.pop() {
            Some(i) => {
                self.nodes[i as usize].entry = entry;
                i
            }
            None => {
                self.nodes.push(Node {
                    entry,
                    red: false,
                    left: NIL,
                    right: NIL,
                    parent: NIL,
                });
                (self.nodes.len() - 1) as u32
            }
        }
    }

    fn release(&mut self, i: u32) {
        self.free.push(i);
    }

    pub fn clear(&mut self) {
        self.nodes.truncate(2);
        self.nodes[NIL as usize] = Node::sentinel();
        self.nodes[HEAD as usize] = Node::sentinel();
        self.free.clear();
        self.len = 0;
    }

    fn left_rotate(&mut self, x: u32) {
        let y = self.right(x);
        let yl = self.left(y);

        self.nodes[x as usize].right = yl;
        if yl != NIL {
            self.nodes[yl as usize].parent = x;
        }

        let xp = self.parent(x);
        self.nodes[y as usize].parent = xp;
        // The root header absorbs the would-be root special case.
        if x == self.left(xp) {
            self.nodes[xp as usize].left = y;
        } else {
            self.nodes[xp as usize].right = y;
        }

        self.nodes[y as usize].left = x;
        self.nodes[x as usize].parent = y;
    }

    fn right_rotate(&mut self, y: u32) {
        let x = self.left(y);
        let xr = self.right(x);

        self.nodes[y as usize].left = xr;
        if xr != NIL {
            self.nodes[xr as usize].parent = y;
        }

        let yp = self.parent(y);
        self.nodes[x as usize].parent = yp;
        if y == self.left(yp) {
            self.nodes[yp as usize].left = x;
        } else {
            self.nodes[yp as usize].right = x;
        }

        self.nodes[x as usize].right = y;
        self.nodes[y as usize].parent = x;
    }

    /// Links a fresh red leaf `z` below `y` (found by a descent that fell
    /// off the tree) and restores the red-black invariants.
    fn attach(&mut self, z: u32, y: u32) {
        self.nodes[z as usize].parent = y;
        if y == HEAD || self.entry(z) < self.entry(y) {
            self.nodes[y as usize].left = z;
        } else {
            self.nodes[y as usize].right = z;
        }
        self.nodes[z as usize].left = NIL;
        self.nodes[z as usize].right = NIL;
        self.nodes[z as usize].red = true;

        self.insert_fixup(z);
        self.len += 1;
    }

    pub fn insert(&mut self, entry: T) {
        let z = self.alloc(entry);
        let mut y = HEAD;
        let mut x = self.root();
        while x != NIL {
            y = x;
            x = if entry < self.entry(x) {
                self.left(x)
            } else {
                self.right(x)
            };
        }
        self.attach(z, y);
    }

    fn insert_fixup(&mut self, mut z: u32) {
        // nil and the header are black, so the loop stops at the root.
        while self.red(self.parent(z)) {
            let zp = self.parent(z);
            let zpp = self.parent(zp);
            if zp == self.left(zpp) {
                let y = self.right(zpp);
                if self.red(y) {
                    self.set_red(zp, false);
                    self.set_red(y, false);
                    self.set_red(zpp, true);
                    z = zpp;
                } else {
                    if z == self.right(zp) {
                        z = zp;
                        self.left_rotate(z);
                    }
                    let zp = self.parent(z);
                    let zpp = self.parent(zp);
                    self.set_red(zp, false);
                    self.set_red(zpp, true);
                    self.right_rotate(zpp);
                }
            } else {
                let y = self.left(zpp);
                if self.red(y) {
                    self.set_red(zp, false);
                    self.set_red(y, false);
                    self.set_red(zpp, true);
                    z = zpp;
                } else {
                    if z == self.left(zp) {
                        z = zp;
                        self.right_rotate(z);
                    }
                    let zp = self.parent(z);
                    let zpp = self.parent(zp);
                    self.set_red(zp, false);
                    self.set_red(zpp, true);
                    self.left_rotate(zpp);
                }
            }
        }
        let root = self.root();
        self.set_red(root, false);
    }

    fn minimum_of(&self, node: u32) -> u32 {
        if node == NIL {
            return NIL;
        }
        let mut x = node;
        while self.left(x) != NIL {
            x = self.left(x);
        }
        x
    }

    fn maximum_of(&self, node: u32) -> u32 {
        if node == NIL {
            return NIL;
        }
        let mut x = node;
        while self.right(x) != NIL {
            x = self.right(x);
        }
        x
    }

    fn successor_of(&self, mut x: u32) -> u32 {
        let y = self.right(x);
        if y != NIL {
            return self.minimum_of(y);
        }
        let mut y = self.parent(x);
        while x == self.right(y) {
            x = y;
            y = self.parent(y);
        }
        if y == HEAD { NIL } else { y }
    }

    fn predecessor_of(&self, mut x: u32) -> u32 {
        let y = self.left(x);
        if y != NIL {
            return self.maximum_of(y);
        }
        let mut y = self.parent(x);
        while x == self.left(y) {
            if y == HEAD {
                return NIL;
            }
            x = y;
            y = self.parent(y);
        }
        y
    }

    fn search(&self, entry: T) -> u32 {
        let mut x = self.root();
        while x != NIL {
            if entry == self.entry(x) {
                return x;
            }
            x = if entry < self.entry(x) {
                self.left(x)
            } else {
                self.right(x)
            };
        }
        NIL
    }

    /// Removes the entry if present. Not merge-aware: the stored entry is
    /// removed verbatim.
    pub fn delete(&mut self, entry: T) -> bool {
        let z = self.search(entry);
        if z == NIL {
            return false;
        }
        self.delete_node(z);
        true
    }

    /// Unlinks node `z`. Splices the successor into `z`'s structural
    /// position instead of copying entries, so every other node index stays
    /// valid across the call.
    fn delete_node(&mut self, z: u32) {
        let y = if self.left(z) == NIL || self.right(z) == NIL {
            z
        } else {
            self.successor_of(z)
        };
        // y has at most one child x.
        let x = if self.left(y) == NIL {
            self.right(y)
        } else {
            self.left(y)
        };

        // Detach y; writing nil's parent here is deliberate, delete_fixup
        // navigates through it.
        let yp = self.parent(y);
        self.nodes[x as usize].parent = yp;
        if yp == HEAD {
            self.nodes[HEAD as usize].left = x;
        } else if y == self.left(yp) {
            self.nodes[yp as usize].left = x;
        } else {
            self.nodes[yp as usize].right = x;
        }

        let y_was_red = self.red(y);
        if y != z {
            // Put y where z was.
            let (zl, zr, zp) = (self.left(z), self.right(z), self.parent(z));
            self.nodes[y as usize].left = zl;
            self.nodes[y as usize].right = zr;
            self.nodes[y as usize].parent = zp;
            self.nodes[zl as usize].parent = y;
            self.nodes[zr as usize].parent = y;
            if z == self.left(zp) {
                self.nodes[zp as usize].left = y;
            } else {
                self.nodes[zp as usize].right = y;
            }
            self.set_red(y, self.red(z));
            if !y_was_red {
                self.delete_fixup(x);
            }
        } else if !y_was_red {
            self.delete_fixup(x);
        }

        self.release(z);
        self.len -= 1;
    }

    fn delete_fixup(&mut self, mut x: u32) {
        while !self.red(x) && x != self.root() {
            let xp = self.parent(x);
            if x == self.left(xp) {
                let mut w = self.right(xp);
                if self.red(w) {
                    self.set_red(w, false);
                    self.set_red(xp, true);
                    self.left_rotate(xp);
                    w = self.right(xp);
                }
                if !self.red(self.left(w)) && !self.red(self.right(w)) {
                    self.set_red(w, true);
                    x = xp;
                } else {
                    if !self.red(self.right(w)) {
                        self.set_red(self.left(w), false);
                        self.set_red(w, true);
                        self.right_rotate(w);
                        w = self.right(xp);
                    }
                    self.set_red(w, self.red(xp));
                    self.set_red(xp, false);
                    self.set_red(self.right(w), false);
                    self.left_rotate(xp);
                    x = self.root();
                }
            } else {
                let mut w = self.left(xp);
                if self.red(w) {
                    self.set_red(w, false);
                    self.set_red(xp, true);
                    self.right_rotate(xp);
                    w = self.left(xp);
                }
                if !self.red(self.left(w)) && !self.red(self.right(w)) {
                    self.set_red(w, true);
                    x = xp;
                } else {
                    if !self.red(self.left(w)) {
                        self.set_red(self.right(w), false);
                        self.set_red(w, true);
                        self.left_rotate(w);
                        w = self.left(xp);
                    }
                    self.set_red(w, self.red(xp));
                    self.set_red(xp, false);
                    self.set_red(self.left(w), false);
                    self.right_rotate(xp);
                    x = self.root();
                }
            }
        }
        self.set_red(x, false);
    }

    /// In-order iterator. Lazy and restartable: calling `iter` again starts
    /// a fresh traversal.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            tree: self,
            cur: self.minimum_of(self.root()),
        }
    }
}

impl<T: Copy + Ord + Default> Default for RbTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Iter<'a, T> {
    tree: &'a RbTree<T>,
    cur: u32,
}

impl<'a, T: Copy + Ord + Default> Iterator for Iter<'a, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.cur == NIL {
            return None;
        }
        let entry = self.tree.entry(self.cur);
        self.cur = self.tree.successor_of(self.cur);
        Some(entry)
    }
}

/// Ordered set of disjoint, non-adjacent closed ranges. Insertion coalesces
/// the new range with every stored range it overlaps or touches.
#[derive(Debug, Clone, Default)]
pub struct RangeSet {
    tree: RbTree<Range>,
}

impl RangeSet {
    pub fn new() -> Self {
        Self {
            tree: RbTree::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Inserts `r`, merging with any stored range it overlaps or touches.
    ///
    /// The descent stops at the first mergeable node; when none exists on
    /// the search path the range cannot be mergeable at all (stored ranges
    /// are pairwise non-touching, so every candidate lies on the ordinary
    /// comparison path). A merge extends the found node in place and then
    /// walks outward in both directions, absorbing neighbors the widened
    /// range now reaches. No node is allocated on a merge.
    pub fn insert(&mut self, r: Range) {
        let mut y = HEAD;
        let mut x = self.tree.root();
        while x != NIL && !self.tree.entry(x).touches(&r) {
            y = x;
            x = if r < self.tree.entry(x) {
                self.tree.left(x)
            } else {
                self.tree.right(x)
            };
        }

        if x == NIL {
            let z = self.tree.alloc(r);
            self.tree.attach(z, y);
            return;
        }

        let mut merged = self.tree.entry(x).cover(&r);
        self.tree.set_entry(x, merged);

        loop {
            let p = self.tree.predecessor_of(x);
            if p == NIL || !self.tree.entry(p).touches(&merged) {
                break;
            }
            merged = merged.cover(&self.tree.entry(p));
            self.tree.delete_node(p);
            self.tree.set_entry(x, merged);
        }
        loop {
            let s = self.tree.successor_of(x);
            if s == NIL || !self.tree.entry(s).touches(&merged) {
                break;
            }
            merged = merged.cover(&self.tree.entry(s));
            self.tree.delete_node(s);
            self.tree.set_entry(x, merged);
        }
    }

    /// Removes a stored range verbatim; returns false when `r` is not a
    /// stored range (no splitting or partial removal).
    pub fn delete(&mut self, r: Range) -> bool {
        self.tree.delete(r)
    }

    /// Ascending traversal of the stored ranges.
    pub fn iter(&self) -> Iter<'_, Range> {
        self.tree.iter()
    }
}

impl<'a> IntoIterator for &'a RangeSet {
    type Item = Range;
    type IntoIter = Iter<'a, Range>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Range> for RangeSet {
    fn from_iter<I: IntoIterator<Item = Range>>(iter: I) -> Self {
        let mut set = RangeSet::new();
        for r in iter {
            set.insert(r);
        }
        set
    }
}
