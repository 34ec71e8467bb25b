//! HTTP [`Remote`] implementation.

use common::operations::{By, Delete, Insert, Restore, Select, Update};
use derive_more::{Display, Error as StdError, From};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracerr::Traced;
use tracing as log;
use url::Url;

use crate::{
    domain::{residence, Draft, Residence},
    infra::{remote, Remote},
};

/// Path of the residence resource, relative to the base URL.
const RESOURCE: &str = "api/residence";

/// HTTP client of the remote service.
#[derive(Clone, Debug)]
pub struct Http {
    /// Underlying HTTP client.
    client: Client,

    /// Base URL of the remote service.
    base_url: Url,
}

impl Http {
    /// Creates a new [`Http`] client of the remote service listening on the
    /// provided `base_url`.
    ///
    /// # Errors
    ///
    /// If the `base_url` is not a valid absolute URL.
    pub fn new(base_url: &str) -> Result<Self, Traced<remote::Error>> {
        let base_url = Url::parse(base_url)
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;
        Ok(Self {
            client: Client::new(),
            base_url,
        })
    }

    /// Builds the full URL of the provided resource `path`.
    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{RESOURCE}/{path}",
            self.base_url.as_str().trim_end_matches('/'),
        )
    }

    /// Sends the provided `request` and returns its successful response.
    async fn send(
        request: RequestBuilder,
    ) -> Result<reqwest::Response, Traced<remote::Error>> {
        let response = request
            .send()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;

        let status = response.status();
        if !status.is_success() {
            log::debug!("remote service responded with `{status}`");
            return Err(tracerr::new!(remote::Error::from(Error::Status(
                status
            ))));
        }
        Ok(response)
    }

    /// Sends the provided `request` and decodes its [`Payload`].
    async fn fetch<T: DeserializeOwned>(
        request: RequestBuilder,
    ) -> Result<T, Traced<remote::Error>> {
        Self::send(request)
            .await
            .map_err(tracerr::wrap!())?
            .json::<Payload<T>>()
            .await
            .map(Payload::into_inner)
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)
    }

    /// Sends the provided `request` expecting a single [`Residence`] back.
    async fn fetch_one(
        request: RequestBuilder,
    ) -> Result<Residence, Traced<remote::Error>> {
        Self::fetch::<OneOrMany<Residence>>(request)
            .await
            .map_err(tracerr::wrap!())?
            .into_first()
            .ok_or(Error::EmptyPayload)
            .map_err(tracerr::from_and_wrap!(=> remote::Error))
    }
}

impl Remote<Select<By<Vec<Residence>, ()>>> for Http {
    type Ok = Vec<Residence>;
    type Err = Traced<remote::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Residence>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        Self::fetch(self.client.get(self.endpoint("fetchAll")))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl Remote<Select<By<Residence, residence::Id>>> for Http {
    type Ok = Residence;
    type Err = Traced<remote::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Residence, residence::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let url = self.endpoint(&format!("fetchById/{}", by.into_inner()));
        Self::fetch_one(self.client.get(url))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl Remote<Insert<Draft>> for Http {
    type Ok = Residence;
    type Err = Traced<remote::Error>;

    async fn execute(
        &self,
        Insert(draft): Insert<Draft>,
    ) -> Result<Self::Ok, Self::Err> {
        Self::fetch_one(self.client.post(self.endpoint("create")).json(&draft))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl Remote<Update<(residence::Id, Draft)>> for Http {
    type Ok = Residence;
    type Err = Traced<remote::Error>;

    async fn execute(
        &self,
        Update((id, draft)): Update<(residence::Id, Draft)>,
    ) -> Result<Self::Ok, Self::Err> {
        /// Request body of an update.
        #[derive(Serialize)]
        struct Body<'a> {
            #[serde(rename = "residenceId")]
            id: residence::Id,

            #[serde(flatten)]
            draft: &'a Draft,
        }

        let body = Body { id, draft: &draft };
        Self::fetch_one(self.client.put(self.endpoint("update")).json(&body))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl Remote<Delete<By<Residence, residence::Id>>> for Http {
    type Ok = ();
    type Err = Traced<remote::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Residence, residence::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let url = self.endpoint(&format!("delete/{}", by.into_inner()));
        Self::send(self.client.delete(url))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl Remote<Restore<By<Residence, residence::Id>>> for Http {
    type Ok = Residence;
    type Err = Traced<remote::Error>;

    async fn execute(
        &self,
        Restore(by): Restore<By<Residence, residence::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let url = self.endpoint(&format!("activate/{}", by.into_inner()));
        Self::fetch_one(self.client.put(url))
            .await
            .map_err(tracerr::wrap!())
    }
}

/// Response body of the remote service.
///
/// Most endpoints wrap their result into a `data` field, while some return
/// it bare.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Payload<T> {
    /// `{ "data": ... }` response.
    Wrapped {
        /// Wrapped result.
        data: T,
    },

    /// Bare response.
    Bare(T),
}

impl<T> Payload<T> {
    /// Unwraps the result of this [`Payload`].
    fn into_inner(self) -> T {
        match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        }
    }
}

/// Single value or a list of values, as returned by the remote service for a
/// single record.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    /// Single value.
    One(T),

    /// List of values.
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// Returns the first value, if any.
    fn into_first(self) -> Option<T> {
        match self {
            Self::One(v) => Some(v),
            Self::Many(vs) => vs.into_iter().next(),
        }
    }
}

/// [`Http`] remote error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Failed to perform a request.
    #[display("request failed: {_0}")]
    Request(reqwest::Error),

    /// Remote service responded with a non-successful status.
    #[display("remote service responded with `{_0}` status")]
    #[from(ignore)]
    Status(#[error(not(source))] StatusCode),

    /// Remote service responded without the expected record.
    #[display("remote service responded without a record")]
    #[from(ignore)]
    EmptyPayload,

    /// Invalid base URL provided.
    #[display("invalid base URL: {_0}")]
    Url(url::ParseError),
}
