//! Campus feature layout, patrol sectors, and fixed sites.
//!
//! All geometry uses the same percent coordinates as the simulation.

use rand::Rng;

use sentinel_core::enums::Sector;
use sentinel_core::types::Point;

/// Category of a campus feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureKind {
    Gate,
    Building,
    Residential,
    Amenity,
    Parking,
}

/// A rectangular campus feature.
#[derive(Debug, Clone)]
pub struct CampusFeature {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: FeatureKind,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// An axis-aligned rectangle used for sector bounds and sampling.
#[derive(Debug, Clone, Copy)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl CampusFeature {
    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

impl Rect {
    /// Uniformly-sampled interior point.
    pub fn sample(&self, rng: &mut impl Rng) -> Point {
        Point::new(
            self.x + rng.gen_range(0.0..self.w),
            self.y + rng.gen_range(0.0..self.h),
        )
    }
}

/// The fixed campus layout. Road rectangles are presentation-only and are
/// not carried here; the routable network lives in `graph`.
pub const CAMPUS_FEATURES: &[CampusFeature] = &[
    CampusFeature {
        id: "res-a",
        name: "Residences A",
        kind: FeatureKind::Residential,
        x: 12.0,
        y: 17.0,
        w: 33.0,
        h: 28.0,
    },
    CampusFeature {
        id: "res-b",
        name: "Residences B",
        kind: FeatureKind::Residential,
        x: 55.0,
        y: 17.0,
        w: 33.0,
        h: 28.0,
    },
    CampusFeature {
        id: "clubhouse",
        name: "Clubhouse",
        kind: FeatureKind::Building,
        x: 12.0,
        y: 55.0,
        w: 20.0,
        h: 15.0,
    },
    CampusFeature {
        id: "pool",
        name: "Pool",
        kind: FeatureKind::Amenity,
        x: 35.0,
        y: 55.0,
        w: 10.0,
        h: 15.0,
    },
    CampusFeature {
        id: "parking-a",
        name: "Parking A",
        kind: FeatureKind::Parking,
        x: 12.0,
        y: 73.0,
        w: 33.0,
        h: 10.0,
    },
    CampusFeature {
        id: "playground",
        name: "Playground",
        kind: FeatureKind::Amenity,
        x: 55.0,
        y: 55.0,
        w: 15.0,
        h: 15.0,
    },
    CampusFeature {
        id: "tennis",
        name: "Tennis Courts",
        kind: FeatureKind::Amenity,
        x: 73.0,
        y: 55.0,
        w: 15.0,
        h: 15.0,
    },
    CampusFeature {
        id: "mail",
        name: "Mail Center",
        kind: FeatureKind::Building,
        x: 55.0,
        y: 73.0,
        w: 33.0,
        h: 10.0,
    },
    CampusFeature {
        id: "gate",
        name: "Main Gate",
        kind: FeatureKind::Gate,
        x: 40.0,
        y: 2.0,
        w: 20.0,
        h: 8.0,
    },
];

// --- Fixed sites ---

/// Road-side entrance just inside the main gate.
pub const GATE_ENTRANCE: Point = Point::new(50.0, 12.0);

/// Drone dock and charging pad, south edge.
pub const DRONE_BASE: Point = Point::new(50.0, 95.0);

/// Off-map holding point for the police unit between dispatches.
pub const OFF_MAP_STATION: Point = Point::new(50.0, -10.0);

/// The operator's own residence (SOS anchor), near the tennis courts.
pub const OPERATOR_HOME: Point = Point::new(78.0, 62.0);

/// Fixed sonic-deterrent installation sites.
pub const DETERRENT_SITES: &[(&str, Point)] = &[
    ("ds1", Point::new(20.0, 20.0)),
    ("ds2", Point::new(80.0, 20.0)),
    ("ds3", Point::new(20.0, 75.0)),
    ("ds4", Point::new(80.0, 75.0)),
];

/// Padding kept from a residential block's edge when placing a home.
const HOME_PADDING: f64 = 5.0;

/// Bounds of the full drone patrol area, used when a drone has no
/// assigned sector.
const OPEN_PATROL_AREA: Rect = Rect {
    x: 10.0,
    y: 10.0,
    w: 80.0,
    h: 80.0,
};

/// Quadrant bounds for a drone patrol sector.
pub fn sector_bounds(sector: Sector) -> Rect {
    match sector {
        Sector::Alpha => Rect {
            x: 5.0,
            y: 10.0,
            w: 45.0,
            h: 45.0,
        },
        Sector::Bravo => Rect {
            x: 50.0,
            y: 10.0,
            w: 45.0,
            h: 45.0,
        },
        Sector::Charlie => Rect {
            x: 5.0,
            y: 55.0,
            w: 45.0,
            h: 41.0,
        },
        Sector::Delta => Rect {
            x: 50.0,
            y: 55.0,
            w: 45.0,
            h: 41.0,
        },
    }
}

/// Random point inside a drone's patrol area — its assigned sector, or
/// the open patrol area when unsectored.
pub fn patrol_point(sector: Option<Sector>, rng: &mut impl Rng) -> Point {
    match sector {
        Some(s) => sector_bounds(s).sample(rng),
        None => OPEN_PATROL_AREA.sample(rng),
    }
}

/// Uniform point in the reportable area (used by the stochastic report
/// generator).
pub fn report_point(rng: &mut impl Rng) -> Point {
    OPEN_PATROL_AREA.sample(rng)
}

/// Home placement for an apartment code: the leading character buckets
/// into one of the two residential blocks, and the home is a uniform
/// interior point with a padding margin from the block edge. Unknown
/// prefixes place nowhere. A placement heuristic, not pathfinding.
pub fn home_location_for(apartment: &str, rng: &mut impl Rng) -> Option<Point> {
    let block_id = match apartment.chars().next()?.to_ascii_uppercase() {
        'A' => "res-a",
        'B' | 'C' | 'D' => "res-b",
        _ => return None,
    };
    let block = CAMPUS_FEATURES.iter().find(|f| f.id == block_id)?;
    let interior = Rect {
        x: block.x + HOME_PADDING,
        y: block.y + HOME_PADDING,
        w: block.w - HOME_PADDING * 2.0,
        h: block.h - HOME_PADDING * 2.0,
    };
    Some(interior.sample(rng))
}

/// Display name of the campus feature nearest to a point, for alert
/// wording. Only inhabited features (buildings, residences, amenities)
/// are considered.
pub fn nearest_feature_name(point: Point) -> &'static str {
    CAMPUS_FEATURES
        .iter()
        .filter(|f| {
            matches!(
                f.kind,
                FeatureKind::Building | FeatureKind::Residential | FeatureKind::Amenity
            )
        })
        .min_by(|a, b| {
            point
                .distance_to(&a.center())
                .total_cmp(&point.distance_to(&b.center()))
        })
        .map(|f| f.name)
        .unwrap_or("community")
}
