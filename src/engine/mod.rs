//! County selection state machine
//!
//! Owns the loaded feature set, the main-county choice and the current
//! label list. Handlers take viewport/marker snapshots as arguments, so the
//! engine never reaches back into the map widget.
//!
//! ```text
//! Empty -> Loading -> Populated <-> Switching
//!            |            |
//!            v            v
//!          Empty       Cleared -> (reactivate) -> Loading
//! ```

pub mod selection;
pub mod status;

pub use selection::nearest;
pub use status::Status;

use crate::api::BoundarySource;
use crate::config::{LabelConfig, SelectionConfig};
use crate::domain::{
    Coordinate, CountyFeature, FeatureRole, LabelPlacement, Relation, StateInfo, Viewport,
};
use crate::error::{LoadError, SelectionError, SourceError};
use crate::layers::LabelPlacer;
use log::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Empty,
    Loading,
    Populated,
    Switching,
    Cleared,
}

/// Summary handed back by a successful load
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome {
    pub feature_ids: Vec<u64>,
    pub main_id: u64,
    pub state: Option<StateInfo>,
}

/// Proof that a load was started; required to finish it
#[derive(Debug)]
pub struct LoadTicket {
    point: Coordinate,
}

#[derive(Debug)]
struct Session {
    features: Vec<CountyFeature>,
    main_id: u64,
    state: Option<StateInfo>,
    labels: Vec<LabelPlacement>,
}

impl Session {
    fn outcome(&self) -> LoadOutcome {
        LoadOutcome {
            feature_ids: self.features.iter().map(|f| f.id).collect(),
            main_id: self.main_id,
            state: self.state.clone(),
        }
    }
}

pub struct CountySelectionEngine {
    placer: LabelPlacer,
    selection: SelectionConfig,
    state: SelectionState,
    session: Option<Session>,
    status: Status,
    label_revision: u64,
}

impl CountySelectionEngine {
    pub fn new(labels: LabelConfig, selection: SelectionConfig) -> Self {
        Self {
            placer: LabelPlacer::new(labels),
            selection,
            state: SelectionState::Empty,
            session: None,
            status: Status::Idle,
            label_revision: 0,
        }
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn features(&self) -> &[CountyFeature] {
        self.session
            .as_ref()
            .map(|s| s.features.as_slice())
            .unwrap_or_default()
    }

    pub fn main_id(&self) -> Option<u64> {
        self.session.as_ref().map(|s| s.main_id)
    }

    pub fn state_info(&self) -> Option<&StateInfo> {
        self.session.as_ref().and_then(|s| s.state.as_ref())
    }

    pub fn labels(&self) -> &[LabelPlacement] {
        self.session
            .as_ref()
            .map(|s| s.labels.as_slice())
            .unwrap_or_default()
    }

    /// Bumped on every label recompute
    pub fn label_revision(&self) -> u64 {
        self.label_revision
    }

    /// Fetch, assemble and select the counties around `point`.
    ///
    /// A populated engine returns its current outcome without fetching
    /// again; deactivate first to force a reload.
    pub fn load_near<S>(&mut self, source: &S, point: Coordinate) -> Result<LoadOutcome, LoadError>
    where
        S: BoundarySource + ?Sized,
    {
        if let Some(session) = &self.session
            && self.state == SelectionState::Populated
        {
            debug!("Counties already loaded, skipping fetch");
            return Ok(session.outcome());
        }

        let ticket = self.begin_load(point)?;
        let relations = source.fetch_counties(point);
        self.finish_load(ticket, relations, |point| {
            source.fetch_state(point).unwrap_or_else(|e| {
                warn!("State lookup failed: {}", e);
                None
            })
        })
    }

    /// Enter `Loading` from `Empty` or `Cleared`.
    ///
    /// Fails while another load is outstanding, and on a populated engine
    /// until [`deactivate`](Self::deactivate) has dropped the current set.
    pub fn begin_load(&mut self, point: Coordinate) -> Result<LoadTicket, LoadError> {
        match self.state {
            SelectionState::Loading => return Err(LoadError::InFlight),
            SelectionState::Populated | SelectionState::Switching => {
                return Err(LoadError::AlreadyLoaded);
            }
            SelectionState::Empty | SelectionState::Cleared => {}
        }
        self.state = SelectionState::Loading;
        self.status = Status::Finding;
        Ok(LoadTicket { point })
    }

    /// Complete a load started with [`begin_load`](Self::begin_load).
    ///
    /// `lookup_state` receives the query point and is only called once a
    /// main county exists; the main county's tags are the fallback. Loads
    /// only start without a feature set, so a failure leaves the engine
    /// `Empty`, never with a partial one.
    pub fn finish_load<F>(
        &mut self,
        ticket: LoadTicket,
        relations: Result<Vec<Relation>, SourceError>,
        lookup_state: F,
    ) -> Result<LoadOutcome, LoadError>
    where
        F: FnOnce(Coordinate) -> Option<StateInfo>,
    {
        let result = relations
            .map_err(LoadError::from)
            .and_then(|relations| self.build_session(relations, ticket.point, lookup_state));

        match result {
            Ok(session) => {
                let outcome = session.outcome();
                self.status = Status::Loaded {
                    count: session.features.len(),
                };
                self.session = Some(session);
                self.state = SelectionState::Populated;
                debug!("{}", self.status);
                Ok(outcome)
            }
            Err(err) => {
                self.status = match &err {
                    LoadError::Source(source) => Status::Failed(source.clone()),
                    _ => Status::NoCounties,
                };
                self.state = SelectionState::Empty;
                warn!("{}", self.status);
                Err(err)
            }
        }
    }

    fn build_session<F>(
        &self,
        relations: Vec<Relation>,
        point: Coordinate,
        lookup_state: F,
    ) -> Result<Session, LoadError>
    where
        F: FnOnce(Coordinate) -> Option<StateInfo>,
    {
        if relations.is_empty() {
            return Err(LoadError::NoDataFound);
        }

        let mut features = Vec::with_capacity(relations.len());
        for relation in &relations {
            match CountyFeature::from_relation(relation) {
                Ok(feature) => features.push(feature),
                Err(e) => warn!("Dropping {} ({}): {}", relation.name(), relation.id, e),
            }
        }

        let mut features = nearest(
            features,
            point,
            self.selection.max_features,
            CountyFeature::centroid,
        );
        let Some(main) = features.first_mut() else {
            return Err(LoadError::NoDataFound);
        };
        main.set_role(FeatureRole::Main);
        let main_id = main.id;
        debug!("Main county: {} ({})", main.name, main_id);

        let state =
            lookup_state(point).or_else(|| StateInfo::from_county_tags(&features[0].tags));

        Ok(Session {
            features,
            main_id,
            state,
            labels: Vec::new(),
        })
    }

    /// Recompute every label for the new viewport
    pub fn on_viewport_changed(
        &mut self,
        viewport: &Viewport,
        reference: Option<Coordinate>,
    ) -> &[LabelPlacement] {
        self.recompute_labels(viewport, reference);
        self.labels()
    }

    /// Make `id` the main county and recompute labels.
    ///
    /// Returns `Ok(false)` when `id` is already main. Only a `Populated`
    /// engine accepts a switch.
    pub fn on_feature_activated(
        &mut self,
        id: u64,
        viewport: &Viewport,
        reference: Option<Coordinate>,
    ) -> Result<bool, SelectionError> {
        if self.state != SelectionState::Populated {
            return Err(SelectionError::NotPopulated);
        }
        let session = self.session.as_mut().ok_or(SelectionError::NotPopulated)?;
        if !session.features.iter().any(|f| f.id == id) {
            return Err(SelectionError::UnknownFeature(id));
        }
        if session.main_id == id {
            return Ok(false);
        }

        self.state = SelectionState::Switching;
        for feature in &mut session.features {
            let role = if feature.id == id {
                FeatureRole::Main
            } else {
                FeatureRole::Context
            };
            feature.set_role(role);
        }
        debug!("Main county switched {} -> {}", session.main_id, id);
        session.main_id = id;

        self.recompute_labels(viewport, reference);
        self.state = SelectionState::Populated;
        Ok(true)
    }

    /// Drop every feature, label and the main selection
    pub fn deactivate(&mut self) {
        self.session = None;
        self.state = SelectionState::Cleared;
        self.status = Status::Hidden;
    }

    fn recompute_labels(&mut self, viewport: &Viewport, reference: Option<Coordinate>) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        session.labels = session
            .features
            .iter()
            .filter(|f| viewport.intersects(&f.bounding_box()))
            .filter_map(|f| {
                self.placer
                    .place(f, viewport, reference)
                    .map(|position| LabelPlacement::new(f.id, position))
            })
            .collect();
        self.label_revision += 1;
        debug!(
            "Placed {} of {} labels",
            session.labels.len(),
            session.features.len()
        );
    }
}
