//! Static centered interval tree over half-open integer spans.
//!
//! Every node owns the spans containing its center, kept twice: sorted by
//! begin ascending and by end descending. Spans entirely below the center go
//! left, spans entirely above go right. The center is the median span
//! midpoint, so each node holds at least one span and each subtree at most
//! half of its parent's, which bounds the depth by `log2(n) + 1`.

use std::cmp::Reverse;

use super::day::DayOffset;

/// Half-open `[begin, end)` with `end > begin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span {
    pub(crate) begin: DayOffset,
    pub(crate) end: DayOffset,
}

impl Span {
    const fn midpoint(self) -> DayOffset {
        self.begin + (self.end - self.begin) / 2
    }
}

#[derive(Debug, Clone)]
struct Node {
    center: DayOffset,
    by_begin: Vec<usize>,
    by_end: Vec<usize>,
    left: Option<usize>,
    right: Option<usize>,
}

#[derive(Debug, Clone)]
pub(crate) struct CenteredTree {
    spans: Vec<Span>,
    nodes: Vec<Node>,
    root: Option<usize>,
}

impl CenteredTree {
    /// Build over `spans`; span ids reported by queries are positions in this vector.
    pub(crate) fn new(spans: Vec<Span>) -> Self {
        debug_assert!(spans.iter().all(|s| s.end > s.begin));
        let mut nodes = Vec::new();
        let members: Vec<usize> = (0..spans.len()).collect();
        let root = build_node(&spans, members, &mut nodes);
        Self { spans, nodes, root }
    }

    /// Call `f` with the id of every span covering `day`.
    ///
    /// Runs in O(depth + k) for k covering spans; ids arrive in no particular order.
    pub(crate) fn for_each_covering(&self, day: DayOffset, mut f: impl FnMut(usize)) {
        let mut cur = self.root;
        while let Some(id) = cur {
            let node = &self.nodes[id];
            if day < node.center {
                // Every span here ends past the center, so only the begin matters.
                for &i in &node.by_begin {
                    if self.spans[i].begin > day {
                        break;
                    }
                    f(i);
                }
                cur = node.left;
            } else {
                // Every span here begins at or before the center, so only the end matters.
                for &i in &node.by_end {
                    if self.spans[i].end <= day {
                        break;
                    }
                    f(i);
                }
                cur = node.right;
            }
        }
    }

    #[cfg(test)]
    fn depth(&self) -> usize {
        fn go(nodes: &[Node], id: Option<usize>) -> usize {
            id.map_or(0, |i| 1 + go(nodes, nodes[i].left).max(go(nodes, nodes[i].right)))
        }
        go(&self.nodes, self.root)
    }
}

fn build_node(spans: &[Span], members: Vec<usize>, nodes: &mut Vec<Node>) -> Option<usize> {
    if members.is_empty() {
        return None;
    }

    let mut mids: Vec<DayOffset> = members.iter().map(|&i| spans[i].midpoint()).collect();
    let median = mids.len() / 2;
    let center = *mids.select_nth_unstable(median).1;

    let mut here = Vec::new();
    let mut below = Vec::new();
    let mut above = Vec::new();
    for i in members {
        let s = spans[i];
        if s.end <= center {
            below.push(i);
        } else if s.begin > center {
            above.push(i);
        } else {
            here.push(i);
        }
    }

    let mut by_begin = here.clone();
    by_begin.sort_unstable_by_key(|&i| (spans[i].begin, i));
    let mut by_end = here;
    by_end.sort_unstable_by_key(|&i| (Reverse(spans[i].end), i));

    let left = build_node(spans, below, nodes);
    let right = build_node(spans, above, nodes);
    nodes.push(Node {
        center,
        by_begin,
        by_end,
        left,
        right,
    });
    Some(nodes.len() - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn covering(tree: &CenteredTree, day: DayOffset) -> Vec<usize> {
        let mut out = Vec::new();
        tree.for_each_covering(day, |i| out.push(i));
        out.sort_unstable();
        out
    }

    #[test]
    fn empty_tree_covers_nothing() {
        let tree = CenteredTree::new(Vec::new());
        assert!(covering(&tree, 0).is_empty());
        assert_eq!(tree.depth(), 0);
    }

    #[test]
    fn half_open_bounds() {
        let tree = CenteredTree::new(vec![
            Span { begin: 0, end: 5 },
            Span { begin: 2, end: 3 },
            Span { begin: 5, end: 6 },
        ]);
        assert!(covering(&tree, -1).is_empty());
        assert_eq!(covering(&tree, 0), vec![0]);
        assert_eq!(covering(&tree, 2), vec![0, 1]);
        assert_eq!(covering(&tree, 3), vec![0]);
        assert_eq!(covering(&tree, 5), vec![2]);
        assert!(covering(&tree, 6).is_empty());
    }

    #[test]
    fn depth_is_logarithmic_for_disjoint_spans() {
        let spans: Vec<Span> = (0..1024)
            .map(|i| Span {
                begin: i * 2,
                end: i * 2 + 1,
            })
            .collect();
        let tree = CenteredTree::new(spans);
        assert!(tree.depth() <= 11, "depth {}", tree.depth());
        assert_eq!(covering(&tree, 10), vec![5]);
        assert!(covering(&tree, 11).is_empty());
    }
}
