//! Precomputed trigonometry for discretized beam angles
//!
//! A full turn is split into `discretization` buckets. Beam angles are
//! tracked as fractional bucket positions and snapped to the nearest bucket
//! on lookup, so a sweep never calls a transcendental function.

use std::f64::consts::TAU;

use glam::DVec2;

/// sin/cos/cot for every bucket in `[0, discretization]`
#[derive(Debug, Clone)]
pub struct DiscretizationTable {
    discretization: usize,
    bucket_step: f64,
    sines: Vec<f64>,
    cosines: Vec<f64>,
    /// `cos/sin`; `INFINITY` at axis-aligned buckets, never read there
    cotangents: Vec<f64>,
}

impl DiscretizationTable {
    /// Build the table for `discretization` buckets and a per-beam angle step
    pub fn new(discretization: usize, angle_increment: f64) -> Self {
        let mut sines = Vec::with_capacity(discretization + 1);
        let mut cosines = Vec::with_capacity(discretization + 1);
        let mut cotangents = Vec::with_capacity(discretization + 1);

        for i in 0..=discretization {
            let theta = TAU * i as f64 / discretization as f64;
            let (s, c) = theta.sin_cos();
            sines.push(s);
            cosines.push(c);
            if is_axis_bucket(i, discretization) {
                cotangents.push(f64::INFINITY);
            } else {
                cotangents.push(c / s);
            }
        }

        Self {
            discretization,
            bucket_step: discretization as f64 * angle_increment / TAU,
            sines,
            cosines,
            cotangents,
        }
    }

    /// Number of stored buckets (`discretization + 1`)
    #[inline]
    pub fn len(&self) -> usize {
        self.sines.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sines.is_empty()
    }

    #[inline]
    pub fn discretization(&self) -> usize {
        self.discretization
    }

    /// Buckets advanced per beam
    #[inline]
    pub fn bucket_step(&self) -> f64 {
        self.bucket_step
    }

    #[inline]
    pub fn sin(&self, bucket: usize) -> f64 {
        self.sines[bucket]
    }

    #[inline]
    pub fn cos(&self, bucket: usize) -> f64 {
        self.cosines[bucket]
    }

    /// Beam slope in `x = k*y + b` form; `None` where the beam runs along x
    #[inline]
    pub fn cot(&self, bucket: usize) -> Option<f64> {
        if self.is_axis_aligned(bucket) {
            None
        } else {
            Some(self.cotangents[bucket])
        }
    }

    /// Unit direction of a bucket
    #[inline]
    pub fn direction(&self, bucket: usize) -> DVec2 {
        DVec2::new(self.cosines[bucket], self.sines[bucket])
    }

    /// Buckets at 0, pi and 2pi, where the cotangent is undefined
    #[inline]
    pub fn is_axis_aligned(&self, bucket: usize) -> bool {
        is_axis_bucket(bucket, self.discretization)
    }

    /// Snap a fractional bucket position to the nearest stored bucket
    ///
    /// Positions in `[0, discretization)` land in `[0, discretization]`.
    #[inline]
    pub fn round_bucket(&self, position: f64) -> usize {
        ((position + 0.5) as usize).min(self.discretization)
    }

    /// Reduce any finite bucket position into `[0, discretization)`
    pub fn wrap(&self, position: f64) -> f64 {
        let d = self.discretization as f64;
        let mut wrapped = position % d;
        if wrapped < 0.0 {
            wrapped += d;
        }
        // -tiny % d + d rounds up to d
        if wrapped >= d {
            wrapped -= d;
        }
        wrapped
    }

    /// Bucket position of the first beam of a sweep
    pub fn start_position(&self, heading: f64, field_of_view: f64) -> f64 {
        let position = self.discretization as f64 * (heading - field_of_view / 2.0) / TAU;
        self.wrap(position)
    }

    /// Advance a wrapped position by one beam
    #[inline]
    pub fn advance(&self, position: f64) -> f64 {
        let d = self.discretization as f64;
        let mut next = position + self.bucket_step;
        while next >= d {
            next -= d;
        }
        while next < 0.0 {
            next += d;
        }
        next
    }
}

#[inline]
fn is_axis_bucket(bucket: usize, discretization: usize) -> bool {
    bucket == 0 || bucket == discretization / 2 || bucket == discretization
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_table_length() {
        let table = DiscretizationTable::new(2000, 0.01);
        assert_eq!(table.len(), 2001);
        assert_eq!(table.discretization(), 2000);
    }

    #[test]
    fn test_quarter_turns() {
        for d in [4, 100, 2000, 4096] {
            let table = DiscretizationTable::new(d, 0.01);
            assert!(table.sin(0).abs() < EPS);
            assert!((table.cos(0) - 1.0).abs() < EPS);
            assert!((table.sin(d / 4) - 1.0).abs() < EPS);
            assert!(table.cos(d / 4).abs() < EPS);
            assert!(table.sin(d / 2).abs() < EPS);
            assert!((table.cos(d / 2) + 1.0).abs() < EPS);
            assert!((table.sin(3 * d / 4) + 1.0).abs() < EPS);
            assert!(table.cos(3 * d / 4).abs() < EPS);
            // Endpoint aliases bucket 0
            assert!((table.sin(d) - table.sin(0)).abs() < EPS);
            assert!((table.cos(d) - table.cos(0)).abs() < EPS);
        }
    }

    #[test]
    fn test_axis_buckets_have_no_slope() {
        let table = DiscretizationTable::new(2000, 0.01);
        assert_eq!(table.cot(0), None);
        assert_eq!(table.cot(1000), None);
        assert_eq!(table.cot(2000), None);
        // Vertical beam: x does not change with y
        assert!(table.cot(500).unwrap().abs() < EPS);
        let k = table.cot(250).unwrap();
        assert!((k - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_bucket_step() {
        let table = DiscretizationTable::new(1440, TAU / 1440.0);
        assert!((table.bucket_step() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_round_bucket() {
        let table = DiscretizationTable::new(100, 0.01);
        assert_eq!(table.round_bucket(0.0), 0);
        assert_eq!(table.round_bucket(0.49), 0);
        assert_eq!(table.round_bucket(0.5), 1);
        assert_eq!(table.round_bucket(99.7), 100);
    }

    #[test]
    fn test_wrap_negative() {
        let table = DiscretizationTable::new(100, 0.01);
        assert!((table.wrap(-25.0) - 75.0).abs() < EPS);
        assert!((table.wrap(250.0) - 50.0).abs() < EPS);
        assert_eq!(table.wrap(-1e-18), 0.0);
    }

    proptest! {
        #[test]
        fn prop_start_position_in_range(heading in -1.0e4f64..1.0e4, fov in 0.1f64..6.3) {
            let table = DiscretizationTable::new(2000, fov / 1079.0);
            let start = table.start_position(heading, fov);
            prop_assert!((0.0..2000.0).contains(&start));
        }

        #[test]
        fn prop_advance_stays_in_range(start in 0.0f64..2000.0, beams in 1usize..3000) {
            let table = DiscretizationTable::new(2000, 4.7 / 1079.0);
            let mut position = start;
            for _ in 0..beams {
                position = table.advance(position);
                prop_assert!((0.0..2000.0).contains(&position));
                prop_assert!(table.round_bucket(position) < table.len());
            }
        }
    }
}
