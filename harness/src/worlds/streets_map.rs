//! Streets-map routing: junctions connected by directed road links.
//!
//! The map is built once, wrapped in an `Arc`, and shared read-only by every
//! `MapProblem` routed over it. A problem may replace the default link
//! weight (`Link::distance`) with a caller-supplied cost function.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use waypoint_kernel::heuristic::Heuristic;
use waypoint_kernel::problem::{GraphProblem, OperatorResult, ProblemError, Successors};

/// Error building a [`StreetsMap`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    #[error("map JSON is malformed: {detail}")]
    Parse { detail: String },
    #[error("junction {index} is declared twice")]
    DuplicateJunction { index: u32 },
    #[error("link {from} -> {to} is stored under junction {owner}")]
    MisplacedLink { owner: u32, from: u32, to: u32 },
    #[error("link {from} -> {to} points at a missing junction")]
    DanglingLink { from: u32, to: u32 },
}

/// A directed road segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub source: u32,
    pub target: u32,
    /// Length of the road segment; the default operator cost.
    pub distance: f64,
    #[serde(default)]
    pub highway_type: u32,
    /// Speed limit in distance units per time unit, if known.
    #[serde(default)]
    pub max_speed: Option<f64>,
}

/// A road junction with its outgoing links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Junction {
    pub index: u32,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub outgoing_links: Vec<Link>,
}

impl Junction {
    /// Planar distance between two junction coordinates.
    #[must_use]
    pub fn air_distance_to(&self, other: &Junction) -> f64 {
        (self.lat - other.lat).hypot(self.lon - other.lon)
    }
}

#[derive(Deserialize)]
struct MapFile {
    junctions: Vec<Junction>,
}

/// Immutable collection of junctions keyed by index.
#[derive(Debug, Clone, PartialEq)]
pub struct StreetsMap {
    junctions: BTreeMap<u32, Junction>,
}

impl StreetsMap {
    /// Build a map, checking that every link is stored under its source
    /// junction and targets a junction that exists.
    ///
    /// # Errors
    ///
    /// Returns [`MapError`] on duplicate junctions or inconsistent links.
    pub fn from_junctions(junctions: Vec<Junction>) -> Result<Self, MapError> {
        let mut by_index = BTreeMap::new();
        for junction in junctions {
            let index = junction.index;
            if by_index.insert(index, junction).is_some() {
                return Err(MapError::DuplicateJunction { index });
            }
        }
        for (owner, junction) in &by_index {
            for link in &junction.outgoing_links {
                if link.source != *owner {
                    return Err(MapError::MisplacedLink {
                        owner: *owner,
                        from: link.source,
                        to: link.target,
                    });
                }
                if !by_index.contains_key(&link.target) {
                    return Err(MapError::DanglingLink {
                        from: link.source,
                        to: link.target,
                    });
                }
            }
        }
        Ok(Self {
            junctions: by_index,
        })
    }

    /// Parse `{"junctions": [...]}`.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::Parse`] on malformed JSON, or any error from
    /// [`StreetsMap::from_junctions`].
    pub fn from_json_str(json: &str) -> Result<Self, MapError> {
        let file: MapFile = serde_json::from_str(json).map_err(|e| MapError::Parse {
            detail: e.to_string(),
        })?;
        Self::from_junctions(file.junctions)
    }

    #[must_use]
    pub fn get(&self, index: u32) -> Option<&Junction> {
        self.junctions.get(&index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.junctions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.junctions.is_empty()
    }

    pub fn junctions(&self) -> impl Iterator<Item = &Junction> {
        self.junctions.values()
    }
}

/// Current location on the map: a junction index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MapState {
    pub junction_id: u32,
}

impl fmt::Display for MapState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>5}", self.junction_id)
    }
}

/// Replacement for the default link weight.
pub type RoadCostFn = Arc<dyn Fn(&Link) -> f64 + Send + Sync>;

/// Route from a source junction to a target junction.
pub struct MapProblem {
    streets_map: Arc<StreetsMap>,
    source_junction_id: u32,
    target_junction_id: u32,
    road_cost_fn: Option<RoadCostFn>,
    zero_road_cost: Option<f64>,
    name: String,
}

impl MapProblem {
    #[must_use]
    pub fn new(streets_map: Arc<StreetsMap>, source_junction_id: u32, target_junction_id: u32) -> Self {
        Self {
            streets_map,
            source_junction_id,
            target_junction_id,
            road_cost_fn: None,
            zero_road_cost: None,
            name: format!("StreetsMap(src: {source_junction_id} dst: {target_junction_id})"),
        }
    }

    /// Use `cost_fn` instead of `Link::distance` as the operator cost.
    #[must_use]
    pub fn with_road_cost_fn(mut self, cost_fn: RoadCostFn) -> Self {
        self.road_cost_fn = Some(cost_fn);
        self
    }

    /// Start accumulating from `zero` instead of `0.0`.
    #[must_use]
    pub fn with_zero_road_cost(mut self, zero: f64) -> Self {
        self.zero_road_cost = Some(zero);
        self
    }

    #[must_use]
    pub fn streets_map(&self) -> &Arc<StreetsMap> {
        &self.streets_map
    }

    #[must_use]
    pub fn target_junction_id(&self) -> u32 {
        self.target_junction_id
    }

    fn junction(&self, state: &MapState) -> Result<&Junction, ProblemError> {
        self.streets_map
            .get(state.junction_id)
            .ok_or_else(|| ProblemError::InvalidState {
                problem: self.name.clone(),
                detail: format!("junction {} is not on the map", state.junction_id),
            })
    }

    fn link_cost(&self, link: &Link) -> f64 {
        match &self.road_cost_fn {
            Some(cost_fn) => cost_fn(link),
            None => link.distance,
        }
    }
}

impl fmt::Debug for MapProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapProblem")
            .field("name", &self.name)
            .field("custom_cost", &self.road_cost_fn.is_some())
            .field("zero_road_cost", &self.zero_road_cost)
            .finish_non_exhaustive()
    }
}

impl GraphProblem for MapProblem {
    type State = MapState;
    type Cost = f64;

    fn name(&self) -> &str {
        &self.name
    }

    fn initial_state(&self) -> MapState {
        MapState {
            junction_id: self.source_junction_id,
        }
    }

    fn is_goal(&self, state: &MapState) -> Result<bool, ProblemError> {
        self.junction(state)?;
        Ok(state.junction_id == self.target_junction_id)
    }

    fn expand_state_with_costs<'a>(
        &'a self,
        state: &'a MapState,
    ) -> Result<Successors<'a, MapState, f64>, ProblemError> {
        let junction = self.junction(state)?;
        Ok(Box::new(junction.outgoing_links.iter().map(move |link| {
            Ok(OperatorResult::new(
                MapState {
                    junction_id: link.target,
                },
                self.link_cost(link),
            ))
        })))
    }

    fn zero_cost(&self) -> f64 {
        self.zero_road_cost.unwrap_or(0.0)
    }
}

/// Planar air distance to the target junction.
///
/// Admissible whenever no link is shorter than the straight line between
/// its endpoints and the default link weights are in use.
#[derive(Debug, Clone)]
pub struct AirDistanceHeuristic {
    streets_map: Arc<StreetsMap>,
    target: Option<Junction>,
}

impl AirDistanceHeuristic {
    #[must_use]
    pub fn new(problem: &MapProblem) -> Self {
        let streets_map = Arc::clone(problem.streets_map());
        let target = streets_map.get(problem.target_junction_id()).cloned();
        Self {
            streets_map,
            target,
        }
    }
}

impl Heuristic<MapState, f64> for AirDistanceHeuristic {
    fn estimate(&self, state: &MapState) -> f64 {
        match (self.streets_map.get(state.junction_id), &self.target) {
            (Some(junction), Some(target)) => junction.air_distance_to(target),
            _ => 0.0,
        }
    }
}
