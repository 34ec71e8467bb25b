//! Test fixtures.

use std::sync::{Arc, Mutex};

use common::operations::{By, Delete, Insert, Restore, Select, Update};
use tokio::sync::watch;
use tracerr::Traced;

use crate::{
    domain::{
        residence::{self, Image, Price, Status},
        Draft, Residence,
    },
    infra::{remote, Remote},
    notification::Trigger,
    Config, Service,
};

/// Builds an active [`Residence`] with a single [`Image`].
pub(crate) fn residence(id: u64, name: &str) -> Residence {
    Residence {
        id: residence::Id::from(id),
        name: name.into(),
        description: "Villa".into(),
        base_price: Price::from(15_000),
        address: Some("1 place du Port".into()),
        telephone: String::new(),
        email: String::new(),
        images: vec![Image::new("a.jpg")],
        localisation: None,
        status: Status::Active,
        created_at: None,
        modified_at: None,
    }
}

/// Builds a [`Draft`] passing validation.
pub(crate) fn draft(name: &str) -> Draft {
    Draft {
        name: Some(name.into()),
        description: Some("Villa avec piscine".into()),
        base_price: Some(Price::from(20_000)),
        address: Some("12 rue des Lilas".into()),
        images: Some(vec![Image::new("facade.jpg")]),
        ..Draft::default()
    }
}

/// Builds a [`Service`] over the provided [`Fake`] with notifications shown
/// on commit only.
pub(crate) fn service(fake: Fake) -> Service<Fake> {
    Service::new(
        Config {
            notification: Trigger::Committed,
            ..Config::default()
        },
        fake,
    )
}

/// In-memory [`Remote`].
#[derive(Clone, Debug)]
pub(crate) struct Fake {
    /// Records kept by this [`Fake`].
    state: Arc<Mutex<State>>,

    /// Whether calls may proceed.
    gate: Arc<watch::Sender<bool>>,
}

/// State of a [`Fake`].
#[derive(Debug, Default)]
struct State {
    /// Kept records.
    residences: Vec<Residence>,

    /// Whether calls fail.
    failing: bool,

    /// Number of calls received.
    calls: usize,
}

impl Default for Fake {
    fn default() -> Self {
        let (gate, _) = watch::channel(true);
        Self {
            state: Arc::default(),
            gate: Arc::new(gate),
        }
    }
}

impl Fake {
    /// Creates a new [`Fake`] keeping the provided records.
    pub(crate) fn with(residences: Vec<Residence>) -> Self {
        let this = Self::default();
        this.state.lock().unwrap().residences = residences;
        this
    }

    /// Makes all the following calls fail.
    pub(crate) fn fail(&self) {
        self.state.lock().unwrap().failing = true;
    }

    /// Holds all the following calls until [`Fake::open()`].
    pub(crate) fn close(&self) {
        _ = self.gate.send_replace(false);
    }

    /// Releases the held calls.
    pub(crate) fn open(&self) {
        _ = self.gate.send_replace(true);
    }

    /// Returns the number of calls received so far.
    pub(crate) fn calls(&self) -> usize {
        self.state.lock().unwrap().calls
    }

    /// Returns the kept records.
    pub(crate) fn residences(&self) -> Vec<Residence> {
        self.state.lock().unwrap().residences.clone()
    }

    /// Waits for the gate and runs the provided function over the [`State`].
    async fn call<T>(
        &self,
        f: impl FnOnce(&mut Vec<Residence>) -> Option<T>,
    ) -> Result<T, Traced<remote::Error>> {
        self.state.lock().unwrap().calls += 1;
        _ = self.gate.subscribe().wait_for(|open| *open).await.unwrap();

        let mut state = self.state.lock().unwrap();
        if state.failing {
            return Err(tracerr::new!(remote::Error::Unavailable(
                "connection refused".into(),
            )));
        }
        f(&mut state.residences).ok_or_else(|| {
            tracerr::new!(remote::Error::Unavailable("not found".into()))
        })
    }
}

/// Applies the present fields of the provided [`Draft`].
fn apply(residence: &mut Residence, draft: Draft) {
    let Draft {
        name,
        description,
        base_price,
        address,
        telephone,
        email,
        images,
        localisation,
        status,
    } = draft;
    if let Some(name) = name {
        residence.name = name;
    }
    if let Some(description) = description {
        residence.description = description;
    }
    if let Some(price) = base_price {
        residence.base_price = price;
    }
    if address.is_some() {
        residence.address = address;
    }
    if let Some(telephone) = telephone {
        residence.telephone = telephone;
    }
    if let Some(email) = email {
        residence.email = email;
    }
    if let Some(images) = images {
        residence.images = images;
    }
    if localisation.is_some() {
        residence.localisation = localisation;
    }
    if let Some(status) = status {
        residence.status = status;
    }
}

impl Remote<Select<By<Vec<Residence>, ()>>> for Fake {
    type Ok = Vec<Residence>;
    type Err = Traced<remote::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Residence>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.call(|all| Some(all.clone())).await
    }
}

impl Remote<Select<By<Residence, residence::Id>>> for Fake {
    type Ok = Residence;
    type Err = Traced<remote::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Residence, residence::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.call(|all| all.iter().find(|r| r.id == id).cloned()).await
    }
}

impl Remote<Insert<Draft>> for Fake {
    type Ok = Residence;
    type Err = Traced<remote::Error>;

    async fn execute(
        &self,
        Insert(draft): Insert<Draft>,
    ) -> Result<Self::Ok, Self::Err> {
        self.call(|all| {
            let next = all.iter().map(|r| u64::from(r.id)).max().unwrap_or(0);
            let mut created = residence(next + 1, "");
            created.images.clear();
            created.address = None;
            apply(&mut created, draft);
            all.push(created.clone());
            Some(created)
        })
        .await
    }
}

impl Remote<Update<(residence::Id, Draft)>> for Fake {
    type Ok = Residence;
    type Err = Traced<remote::Error>;

    async fn execute(
        &self,
        Update((id, draft)): Update<(residence::Id, Draft)>,
    ) -> Result<Self::Ok, Self::Err> {
        self.call(|all| {
            let existing = all.iter_mut().find(|r| r.id == id)?;
            apply(existing, draft);
            Some(existing.clone())
        })
        .await
    }
}

impl Remote<Delete<By<Residence, residence::Id>>> for Fake {
    type Ok = ();
    type Err = Traced<remote::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Residence, residence::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.call(|all| {
            all.iter_mut().find(|r| r.id == id)?.status = Status::Inactive;
            Some(())
        })
        .await
    }
}

impl Remote<Restore<By<Residence, residence::Id>>> for Fake {
    type Ok = Residence;
    type Err = Traced<remote::Error>;

    async fn execute(
        &self,
        Restore(by): Restore<By<Residence, residence::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.call(|all| {
            let existing = all.iter_mut().find(|r| r.id == id)?;
            existing.status = Status::Active;
            Some(existing.clone())
        })
        .await
    }
}
