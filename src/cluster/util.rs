#[derive(Clone, Debug)]
pub(crate) struct UnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl UnionFind {
    pub(crate) fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    /// Root of `x`, halving the path on the way up.
    pub(crate) fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    pub(crate) fn union(&mut self, a: usize, b: usize) -> usize {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return ra;
        }

        // Union by size.
        let (big, small) = if self.size[ra] < self.size[rb] {
            (rb, ra)
        } else {
            (ra, rb)
        };
        self.parent[small] = big;
        self.size[big] += self.size[small];
        big
    }

    /// One label per element, `1..=components`, numbered by first appearance
    /// in index order.
    pub(crate) fn labels(&mut self) -> Vec<usize> {
        let n = self.parent.len();
        let mut root_label = vec![0usize; n];
        let mut next = 0usize;
        let mut out = Vec::with_capacity(n);
        for i in 0..n {
            let r = self.find(i);
            if root_label[r] == 0 {
                next += 1;
                root_label[r] = next;
            }
            out.push(root_label[r]);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_follow_first_appearance() {
        let mut uf = UnionFind::new(5);
        uf.union(3, 4);
        uf.union(1, 4);
        assert_eq!(uf.labels(), vec![1, 2, 3, 2, 2]);
    }

    #[test]
    fn union_is_idempotent() {
        let mut uf = UnionFind::new(3);
        let r = uf.union(0, 2);
        assert_eq!(uf.union(2, 0), r);
        assert_eq!(uf.find(0), uf.find(2));
        assert_ne!(uf.find(1), uf.find(0));
    }
}
