use crate::config::LabelConfig;
use crate::domain::{BoundingBox, Coordinate, CountyFeature, Ring, Viewport};
use crate::geometry::{contains, haversine_m, min_distance_to_boundary, visible_area_ratio};

/// Finds a label position for a county in the current viewport.
///
/// A returned position is always inside the viewport, inside the polygon,
/// away from the reference marker and clear of the polygon boundary.
/// `None` is a normal outcome: the county is drawn without a label.
#[derive(Debug, Clone, Default)]
pub struct LabelPlacer {
    config: LabelConfig,
}

/// Acceptance thresholds for a single search pass
#[derive(Debug, Clone, Copy)]
struct Rules<'a> {
    rings: &'a [Ring],
    viewport: &'a Viewport,
    visible: BoundingBox,
    reference: Option<Coordinate>,
    marker_distance_m: f64,
    clearance_m: f64,
}

impl Rules<'_> {
    fn accepts(&self, candidate: Coordinate) -> bool {
        // Cheapest checks first, boundary distance last
        if !self.viewport.contains(candidate) || !self.visible.contains(candidate) {
            return false;
        }
        if !contains(candidate, self.rings) {
            return false;
        }
        if let Some(reference) = self.reference
            && haversine_m(candidate, reference) < self.marker_distance_m
        {
            return false;
        }
        min_distance_to_boundary(candidate, self.rings) >= self.clearance_m
    }
}

impl LabelPlacer {
    pub fn new(config: LabelConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LabelConfig {
        &self.config
    }

    /// Label position for `feature`, or `None` when no acceptable spot exists.
    ///
    /// # Search order
    /// 1. Skip features that are not majority-visible
    /// 2. Try the feature's vertex-mean centroid
    /// 3. Spiral outwards from the viewport center and take the accepted
    ///    point closest to the center on the first ring with any hit
    /// 4. Repeat the spiral with the boundary clearance relaxed
    pub fn place(
        &self,
        feature: &CountyFeature,
        viewport: &Viewport,
        reference: Option<Coordinate>,
    ) -> Option<Coordinate> {
        let rings = feature.rings();
        let ratio = visible_area_ratio(rings, viewport, self.config.grid_steps);
        if ratio <= self.config.min_visible_ratio {
            log::debug!(
                "{}: {:.0}% visible, no label",
                feature.name,
                ratio * 100.0
            );
            return None;
        }

        let visible = feature.bounding_box().intersection(&viewport.bounds)?;
        let clearance_m = shorter_side_m(&visible) * self.config.boundary_fraction;

        let centroid_rules = Rules {
            rings,
            viewport,
            visible,
            reference,
            marker_distance_m: self.config.marker_distance_m,
            clearance_m,
        };
        if centroid_rules.accepts(feature.centroid()) {
            return Some(feature.centroid());
        }

        let strict = Rules {
            marker_distance_m: self.config.marker_distance_m * self.config.marker_margin,
            ..centroid_rules
        };
        let relaxed = Rules {
            clearance_m: clearance_m * self.config.relaxed_fraction,
            ..strict
        };

        self.spiral_search(&strict)
            .or_else(|| self.spiral_search(&relaxed))
    }

    fn spiral_search(&self, rules: &Rules<'_>) -> Option<Coordinate> {
        let visible = &rules.visible;
        let extent = visible.height_deg().max(visible.width_deg());
        let step = extent / self.config.radial_divisions;
        if !step.is_finite() || step <= 0.0 {
            return None;
        }

        let center = rules.viewport.center;
        let (near, far) = radius_range(center, visible);
        let first = (near / step).floor() as usize;
        let last = (far / step).ceil() as usize;

        for k in first..=last {
            let radius = k as f64 * step;
            let best = circle_points(center, radius, self.config.angle_step_deg)
                .into_iter()
                .filter(|c| rules.accepts(*c))
                .map(|c| (haversine_m(c, center), c))
                .min_by(|a, b| a.0.total_cmp(&b.0));

            if let Some((_, position)) = best {
                return Some(position);
            }
        }
        None
    }
}

/// Shorter side of the box in meters, measured along its west and south edges
fn shorter_side_m(bbox: &BoundingBox) -> f64 {
    let height = haversine_m(bbox.south_west(), bbox.north_west());
    let width = haversine_m(bbox.south_west(), bbox.south_east());
    height.min(width)
}

/// Degree-space radii from `center` to the nearest and farthest point of `bbox`
fn radius_range(center: Coordinate, bbox: &BoundingBox) -> (f64, f64) {
    let d_lat_near = (bbox.south - center.lat).max(center.lat - bbox.north).max(0.0);
    let d_lng_near = (bbox.west - center.lng).max(center.lng - bbox.east).max(0.0);
    let d_lat_far = (center.lat - bbox.south).abs().max((bbox.north - center.lat).abs());
    let d_lng_far = (center.lng - bbox.west).abs().max((bbox.east - center.lng).abs());
    (d_lat_near.hypot(d_lng_near), d_lat_far.hypot(d_lng_far))
}

fn circle_points(center: Coordinate, radius: f64, angle_step_deg: f64) -> Vec<Coordinate> {
    if radius <= 0.0 {
        return vec![center];
    }
    let step = if angle_step_deg > 0.0 {
        angle_step_deg
    } else {
        crate::config::defaults::ANGLE_STEP_DEG
    };
    let count = (360.0 / step).ceil() as usize;
    (0..count)
        .map(|i| {
            let rad = (i as f64 * step).to_radians();
            Coordinate::new(center.lat + radius * rad.cos(), center.lng + radius * rad.sin())
        })
        .collect()
}
