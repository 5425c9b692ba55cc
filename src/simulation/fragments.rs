//! Connected-component fragment detection.
//!
//! Two nucleons are adjacent when their distance is below a configured
//! fraction of the strong-force radius. Components of that relation are
//! "fragments": physically contiguous clusters. Labels are dense, 0-based,
//! and reassigned from scratch every tick; their numbering carries no
//! meaning across ticks.

use crate::nucleon::{Nucleon, Species};
use smallvec::SmallVec;
use std::collections::VecDeque;

/// Per-fragment census, indexed by fragment id.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Fragment {
    pub protons: usize,
    pub neutrons: usize,
}

impl Fragment {
    pub fn size(&self) -> usize {
        self.protons + self.neutrons
    }
}

/// Label every nucleon with its fragment id and return the census.
///
/// Builds the adjacency relation pairwise, then walks each component
/// breadth-first from the first unvisited nucleon. Every nucleon gets
/// exactly one label, singletons included. An empty slice yields an empty
/// census.
pub fn detect(nucleons: &mut [Nucleon], link_radius: f32) -> Vec<Fragment> {
    let n = nucleons.len();
    if n == 0 {
        return Vec::new();
    }

    let link_sq = link_radius * link_radius;
    let mut adjacency: Vec<SmallVec<[usize; 8]>> = vec![SmallVec::new(); n];
    for i in 0..n {
        for j in (i + 1)..n {
            if (nucleons[j].pos - nucleons[i].pos).mag_sq() < link_sq {
                adjacency[i].push(j);
                adjacency[j].push(i);
            }
        }
    }

    let mut fragments = Vec::new();
    let mut visited = vec![false; n];
    let mut queue = VecDeque::new();
    for start in 0..n {
        if visited[start] {
            continue;
        }
        let fragment_id = fragments.len();
        let mut census = Fragment::default();
        visited[start] = true;
        queue.push_back(start);
        while let Some(i) = queue.pop_front() {
            nucleons[i].fragment_id = fragment_id;
            match nucleons[i].species {
                Species::Proton => census.protons += 1,
                Species::Neutron => census.neutrons += 1,
            }
            for &j in &adjacency[i] {
                if !visited[j] {
                    visited[j] = true;
                    queue.push_back(j);
                }
            }
        }
        fragments.push(census);
    }
    fragments
}
