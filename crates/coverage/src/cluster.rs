//! Grouping of offices whose coverage circles overlap.
//!
//! Two strategies are offered. [`greedy`] walks office pairs in input order
//! and folds each overlapping pair into the first existing cluster that
//! already holds one of its offices; clusters are never merged with each
//! other. [`connected_components`] runs union-find over the full overlap
//! graph instead.

use crate::analysis::{CoverageOverlap, OfficeCoverage, OverlapType};
use crate::boundary::covered_areas;
use crate::haversine::circles_overlap;
use crate::{Boundary, Layer, Office, Point, RadiusPolicy};
use std::collections::{HashMap, HashSet};

/// Cluster under construction; members are indices into the office slice.
#[derive(Debug)]
struct ClusterBuilder {
    id: String,
    members: Vec<usize>,
    layers: Vec<Layer>,
    covered_areas: Vec<String>,
}

impl ClusterBuilder {
    fn build(self, offices: &[Office]) -> CoverageOverlap {
        let members: Vec<Office> = self.members.iter().map(|&i| offices[i].clone()).collect();
        let centroid = mean_location(&members);

        CoverageOverlap {
            id: self.id,
            layers: self.layers,
            offices: members,
            centroid,
            covered_areas: self.covered_areas,
            overlap_type: OverlapType::Partial,
        }
    }
}

/// Deterministic cluster id from the two offices that seeded it.
pub(crate) fn overlap_id(first: &Office, second: &Office) -> String {
    format!("overlap-{}-{}", first.id, second.id)
}

/// Arithmetic mean of the office locations, `(0, 0)` when empty.
pub(crate) fn mean_location(offices: &[Office]) -> Point {
    if offices.is_empty() {
        return Point::new(0.0, 0.0);
    }

    let n = offices.len() as f64;
    let (lat, lng) = offices.iter().fold((0.0, 0.0), |(lat, lng), office| {
        (lat + office.location.latitude, lng + office.location.longitude)
    });

    Point::new(lat / n, lng / n)
}

/// Appends names not already present, keeping first-seen order.
pub(crate) fn extend_unique<'a>(target: &mut Vec<String>, names: impl IntoIterator<Item = &'a String>) {
    let mut seen: HashSet<String> = target.iter().cloned().collect();
    for name in names {
        if seen.insert(name.clone()) {
            target.push(name.clone());
        }
    }
}

fn push_layer(layers: &mut Vec<Layer>, layer: Layer) {
    if !layers.contains(&layer) {
        layers.push(layer);
    }
}

#[inline]
fn pair_overlaps(a: &Office, b: &Office, policy: RadiusPolicy) -> bool {
    circles_overlap(
        &a.location,
        a.governing_radius_km(policy),
        &b.location,
        b.governing_radius_km(policy),
    )
}

/// First-match greedy clustering.
///
/// An overlapping pair joins the earliest-created cluster holding either
/// office; only offices not yet in any cluster are added, so every office
/// ends up in at most one cluster. A pair with no clustered office seeds a
/// new cluster.
pub(crate) fn greedy(
    offices: &[Office],
    boundaries: &[Boundary],
    coverage: &[OfficeCoverage],
    policy: RadiusPolicy,
) -> Vec<CoverageOverlap> {
    let mut clusters: Vec<ClusterBuilder> = Vec::new();
    let mut assigned: Vec<Option<usize>> = vec![None; offices.len()];

    for i in 0..offices.len() {
        for j in (i + 1)..offices.len() {
            if !pair_overlaps(&offices[i], &offices[j], policy) {
                continue;
            }

            let existing = match (assigned[i], assigned[j]) {
                (Some(a), Some(b)) => Some(a.min(b)),
                (Some(a), None) | (None, Some(a)) => Some(a),
                (None, None) => None,
            };

            match existing {
                Some(k) => {
                    let mut changed = false;
                    for idx in [i, j] {
                        if assigned[idx].is_none() {
                            assigned[idx] = Some(k);
                            clusters[k].members.push(idx);
                            push_layer(&mut clusters[k].layers, offices[idx].layer);
                            changed = true;
                        }
                    }

                    if changed {
                        let cluster = &mut clusters[k];
                        let mut areas = Vec::new();
                        for &member in &cluster.members {
                            let fresh = covered_areas(&offices[member], boundaries, policy);
                            extend_unique(&mut areas, &fresh);
                        }
                        cluster.covered_areas = areas;
                    }
                }
                None => {
                    let mut layers = Vec::with_capacity(2);
                    push_layer(&mut layers, offices[i].layer);
                    push_layer(&mut layers, offices[j].layer);

                    let mut areas = coverage[i].covered_areas.clone();
                    extend_unique(&mut areas, &coverage[j].covered_areas);

                    let k = clusters.len();
                    assigned[i] = Some(k);
                    assigned[j] = Some(k);
                    clusters.push(ClusterBuilder {
                        id: overlap_id(&offices[i], &offices[j]),
                        members: vec![i, j],
                        layers,
                        covered_areas: areas,
                    });
                }
            }
        }
    }

    clusters.into_iter().map(|c| c.build(offices)).collect()
}

/// Union-Find over office indices.
struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl UnionFind {
    fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            self.parent[x] = self.find(self.parent[x]);
        }
        self.parent[x]
    }

    fn union(&mut self, x: usize, y: usize) {
        let px = self.find(x);
        let py = self.find(y);
        if px == py {
            return;
        }
        if self.rank[px] < self.rank[py] {
            self.parent[px] = py;
        } else if self.rank[px] > self.rank[py] {
            self.parent[py] = px;
        } else {
            self.parent[py] = px;
            self.rank[px] += 1;
        }
    }
}

/// One cluster per connected component of the overlap graph.
///
/// Clusters are ordered by their first member's input position and list
/// members in input order.
pub(crate) fn connected_components(
    offices: &[Office],
    coverage: &[OfficeCoverage],
    policy: RadiusPolicy,
) -> Vec<CoverageOverlap> {
    let mut uf = UnionFind::new(offices.len());

    for i in 0..offices.len() {
        for j in (i + 1)..offices.len() {
            if pair_overlaps(&offices[i], &offices[j], policy) {
                uf.union(i, j);
            }
        }
    }

    let mut order: Vec<usize> = Vec::new();
    let mut components: HashMap<usize, Vec<usize>> = HashMap::new();
    for idx in 0..offices.len() {
        let root = uf.find(idx);
        let members = components.entry(root).or_default();
        if members.is_empty() {
            order.push(root);
        }
        members.push(idx);
    }

    order
        .into_iter()
        .filter_map(|root| components.remove(&root))
        .filter(|members| members.len() >= 2)
        .map(|members| {
            let mut layers = Vec::new();
            let mut areas = Vec::new();
            for &idx in &members {
                push_layer(&mut layers, offices[idx].layer);
                extend_unique(&mut areas, &coverage[idx].covered_areas);
            }

            ClusterBuilder {
                id: overlap_id(&offices[members[0]], &offices[members[1]]),
                members,
                layers,
                covered_areas: areas,
            }
            .build(offices)
        })
        .collect()
}
