//! Reusable connection-line vertex buffer.
//!
//! The buffer is a flat array of `x, y, z` triples, two per segment, sized
//! once for the worst case and rewritten in place every tick. Only the first
//! [`LineBuffer::vertex_count`] vertices are meaningful; [`LineBuffer::trim`]
//! zeroes the rest so a renderer drawing the whole buffer never shows stale
//! geometry from an earlier, busier tick.

use glam::Vec3;

/// Flat line-segment endpoint buffer.
#[derive(Debug, Clone, Default)]
pub struct LineBuffer {
    data: Vec<f32>,
    cursor: usize,
}

impl LineBuffer {
    /// Worst-case endpoint count for `particle_count` particles: every
    /// ordered pair emits two endpoints. `None` on overflow.
    pub fn max_vertices(particle_count: usize) -> Option<usize> {
        particle_count
            .checked_mul(particle_count.saturating_sub(1))?
            .checked_mul(2)
    }

    /// Allocate a zeroed buffer able to hold every possible segment.
    /// `None` if the size overflows.
    pub fn for_particles(particle_count: usize) -> Option<Self> {
        Self::max_vertices(particle_count).and_then(Self::with_vertex_capacity)
    }

    /// Allocate a zeroed buffer holding up to `vertices` endpoints.
    /// `None` if the float count overflows.
    pub fn with_vertex_capacity(vertices: usize) -> Option<Self> {
        let floats = vertices.checked_mul(3)?;
        Some(Self {
            data: vec![0.0; floats],
            cursor: 0,
        })
    }


    /// Start a new tick. Existing floats are left in place until [`trim`](Self::trim).
    #[inline]
    pub fn begin(&mut self) {
        self.cursor = 0;
    }

    /// Append one segment. Returns `false` (and writes nothing) if full.
    #[inline]
    pub fn push_segment(&mut self, a: Vec3, b: Vec3) -> bool {
        let offset = self.cursor * 3;
        if offset + 6 > self.data.len() {
            return false;
        }
        self.data[offset..offset + 3].copy_from_slice(&a.to_array());
        self.data[offset + 3..offset + 6].copy_from_slice(&b.to_array());
        self.cursor += 2;
        true
    }

    /// Zero every float past the last written vertex.
    pub fn trim(&mut self) {
        let start = self.cursor * 3;
        self.data[start..].fill(0.0);
    }

    /// Endpoints written since the last [`begin`](Self::begin).
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.cursor
    }

    /// Segments written since the last [`begin`](Self::begin).
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.cursor / 2
    }

    /// Capacity in endpoints.
    #[inline]
    pub fn vertex_capacity(&self) -> usize {
        self.data.len() / 3
    }

    /// The whole backing buffer, including the zeroed tail.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Only the floats written this tick.
    #[inline]
    pub fn active(&self) -> &[f32] {
        &self.data[..self.cursor * 3]
    }

    /// Iterate written segments as endpoint pairs.
    pub fn segments(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
        self.active()
            .chunks_exact(6)
            .map(|c| (Vec3::new(c[0], c[1], c[2]), Vec3::new(c[3], c[4], c[5])))
    }

    /// Drop the backing storage.
    pub fn release(&mut self) {
        self.data = Vec::new();
        self.cursor = 0;
    }
}
