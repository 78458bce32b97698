//! Named-transaction dispatch.
//!
//! Clients drive the registry by function name with positional string
//! arguments and get JSON bytes back. This module is that calling
//! convention; transport and caller authentication live outside it.
//!
//! | Function      | Deployed name   | Arguments                                | Response         |
//! |---------------|-----------------|------------------------------------------|------------------|
//! | `Create`      | `ShareData`     | id, owner, pointer, description, allowed | empty            |
//! | `CheckAccess` | `RequestAccess` | id, party                                | `true` / `false` |
//! | `Read`        | `GetData`       | id, requester                            | record object    |
//! | `Enumerate`   | `GetAllData`    | requester                                | array of records |
//!
//! Both names in a row parse to the same [`Invocation`]; existing clients
//! keep calling the deployed names.

use datashare_core::{PartyId, Record, RecordId};
use datashare_store::Substrate;
use thiserror::Error;

use crate::error::RegistryError;
use crate::registry::Registry;

pub const CREATE: &str = "Create";
pub const CHECK_ACCESS: &str = "CheckAccess";
pub const READ: &str = "Read";
pub const ENUMERATE: &str = "Enumerate";

pub const SHARE_DATA: &str = "ShareData";
pub const REQUEST_ACCESS: &str = "RequestAccess";
pub const GET_DATA: &str = "GetData";
pub const GET_ALL_DATA: &str = "GetAllData";

/// Errors from parsing or executing an invocation.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("unknown function: {0}")]
    UnknownFunction(String),

    #[error("{function} expects {expected} arguments, got {got}")]
    Arity {
        function: &'static str,
        expected: usize,
        got: usize,
    },

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("response encoding error: {0}")]
    Response(#[from] serde_json::Error),
}

/// A parsed call against the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Create(Record),
    CheckAccess { id: RecordId, party: PartyId },
    Read { id: RecordId, requester: PartyId },
    Enumerate { requester: PartyId },
}

impl Invocation {
    /// Parse a function name and its positional arguments.
    pub fn parse<A: AsRef<str>>(function: &str, args: &[A]) -> Result<Self, DispatchError> {
        let arg = |i: usize| args[i].as_ref().to_owned();

        match function {
            CREATE | SHARE_DATA => {
                expect_arity(CREATE, args.len(), 5)?;
                Ok(Invocation::Create(Record::new(
                    arg(0),
                    arg(1),
                    arg(2),
                    arg(3),
                    arg(4),
                )))
            }
            CHECK_ACCESS | REQUEST_ACCESS => {
                expect_arity(CHECK_ACCESS, args.len(), 2)?;
                Ok(Invocation::CheckAccess {
                    id: arg(0).into(),
                    party: arg(1).into(),
                })
            }
            READ | GET_DATA => {
                expect_arity(READ, args.len(), 2)?;
                Ok(Invocation::Read {
                    id: arg(0).into(),
                    requester: arg(1).into(),
                })
            }
            ENUMERATE | GET_ALL_DATA => {
                expect_arity(ENUMERATE, args.len(), 1)?;
                Ok(Invocation::Enumerate {
                    requester: arg(0).into(),
                })
            }
            other => Err(DispatchError::UnknownFunction(other.to_owned())),
        }
    }

    /// Canonical function name of this invocation.
    pub fn function(&self) -> &'static str {
        match self {
            Invocation::Create(_) => CREATE,
            Invocation::CheckAccess { .. } => CHECK_ACCESS,
            Invocation::Read { .. } => READ,
            Invocation::Enumerate { .. } => ENUMERATE,
        }
    }
}

fn expect_arity(function: &'static str, got: usize, expected: usize) -> Result<(), DispatchError> {
    if got != expected {
        return Err(DispatchError::Arity {
            function,
            expected,
            got,
        });
    }
    Ok(())
}

impl<S: Substrate> Registry<S> {
    /// Execute an invocation and encode its response as JSON.
    pub async fn dispatch(&self, invocation: Invocation) -> Result<Vec<u8>, DispatchError> {
        tracing::debug!(function = invocation.function(), "dispatching");

        let response = match invocation {
            Invocation::Create(record) => {
                self.create(&record).await?;
                Vec::new()
            }
            Invocation::CheckAccess { id, party } => {
                serde_json::to_vec(&self.check_access(&id, &party).await?)?
            }
            Invocation::Read { id, requester } => {
                serde_json::to_vec(&self.read(&id, &requester).await?)?
            }
            Invocation::Enumerate { requester } => {
                serde_json::to_vec(&self.enumerate(&requester).await?)?
            }
        };

        Ok(response)
    }

    /// Parse and execute in one step.
    pub async fn invoke<A: AsRef<str>>(
        &self,
        function: &str,
        args: &[A],
    ) -> Result<Vec<u8>, DispatchError> {
        let invocation = Invocation::parse(function, args)?;
        self.dispatch(invocation).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::registry::RegistryConfig;
    use datashare_store::MemoryStore;

    fn registry() -> Registry<MemoryStore> {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        Registry::new(MemoryStore::new(), RegistryConfig::default())
    }

    #[test]
    fn test_parse_arity() {
        let err = Invocation::parse(CREATE, &["rec1", "HospA"]).unwrap_err();
        assert!(matches!(
            err,
            DispatchError::Arity {
                function: "Create",
                expected: 5,
                got: 2
            }
        ));

        let empty: [&str; 0] = [];
        assert!(Invocation::parse(ENUMERATE, &empty).is_err());
    }

    #[test]
    fn test_parse_unknown_function() {
        let err = Invocation::parse("Delete", &["rec1"]).unwrap_err();
        assert!(matches!(err, DispatchError::UnknownFunction(ref f) if f == "Delete"));
    }

    #[test]
    fn test_parse_create() {
        let invocation =
            Invocation::parse(CREATE, &["rec1", "HospA", "hash123", "notes", "HospB, HospC"])
                .unwrap();
        assert_eq!(invocation.function(), CREATE);
        assert_eq!(
            invocation,
            Invocation::Create(Record::new("rec1", "HospA", "hash123", "notes", "HospB, HospC"))
        );
    }

    #[tokio::test]
    async fn test_invoke_round() {
        let registry = registry();

        let out = registry
            .invoke(CREATE, &["rec1", "HospA", "hash123", "notes", "HospB, HospC"])
            .await
            .unwrap();
        assert!(out.is_empty());

        let out = registry.invoke(CHECK_ACCESS, &["rec1", "HospB"]).await.unwrap();
        assert_eq!(out, b"true");
        let out = registry.invoke(CHECK_ACCESS, &["rec1", "HospD"]).await.unwrap();
        assert_eq!(out, b"false");

        let out = registry.invoke(READ, &["rec1", "HospC"]).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["ipfsHash"], "hash123");
        assert_eq!(value["allowedHospitals"], "HospB, HospC");

        let out = registry.invoke(ENUMERATE, &["HospZ"]).await.unwrap();
        assert_eq!(out, b"[]");

        let out = registry.invoke(ENUMERATE, &["HospB"]).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 1);
        assert_eq!(value[0]["dataID"], "rec1");
    }

    #[test]
    fn test_deployed_names_parse_like_canonical_ones() {
        let pairs: [(&str, &str, &[&str]); 4] = [
            (SHARE_DATA, CREATE, &["rec1", "HospA", "h", "d", "HospB"]),
            (REQUEST_ACCESS, CHECK_ACCESS, &["rec1", "HospB"]),
            (GET_DATA, READ, &["rec1", "HospB"]),
            (GET_ALL_DATA, ENUMERATE, &["HospB"]),
        ];
        for (deployed, canonical, args) in pairs {
            let invocation = Invocation::parse(deployed, args).unwrap();
            assert_eq!(invocation, Invocation::parse(canonical, args).unwrap());
            assert_eq!(invocation.function(), canonical);
        }
    }

    #[tokio::test]
    async fn test_invoke_deployed_names() {
        let registry = registry();

        let out = registry
            .invoke(
                SHARE_DATA,
                &["MED001", "HospitalA", "QmHash1", "scan", "HospitalB, HospitalC"],
            )
            .await
            .unwrap();
        assert!(out.is_empty());

        let out = registry
            .invoke(REQUEST_ACCESS, &["MED001", "HospitalB"])
            .await
            .unwrap();
        assert_eq!(out, b"true");

        let out = registry.invoke(GET_DATA, &["MED001", "HospitalC"]).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["ipfsHash"], "QmHash1");

        let err = registry
            .invoke(GET_DATA, &["MED001", "HospitalD"])
            .await
            .unwrap_err();
        match err {
            DispatchError::Registry(e) => assert_eq!(e.kind(), ErrorKind::Forbidden),
            other => panic!("expected registry error, got {other:?}"),
        }

        let out = registry.invoke(GET_ALL_DATA, &["HospitalB"]).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["dataID"], "MED001");
    }

    #[tokio::test]
    async fn test_invoke_surfaces_registry_errors() {
        let registry = registry();

        let err = registry.invoke(READ, &["nope", "HospB"]).await.unwrap_err();
        match err {
            DispatchError::Registry(e) => assert_eq!(e.kind(), ErrorKind::NotFound),
            other => panic!("expected registry error, got {other:?}"),
        }
    }
}
