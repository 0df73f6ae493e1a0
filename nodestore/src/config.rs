use serde::Deserialize;
use url::Url;

use crate::memory::MemoryResource;
use crate::Error;

/// How node content hashes are maintained for a resource.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashType {
    None,
    #[default]
    Rolling,
    Postorder,
}

/// Per-resource settings the node layer honours.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceConfig {
    #[serde(default)]
    pub hash_type: HashType,

    /// Whether position codes handed to the factory are kept on the records.
    #[serde(default)]
    pub store_dewey_ids: bool,
}

impl TryFrom<Url> for ResourceConfig {
    type Error = Error;

    fn try_from(url: Url) -> Result<Self, Self::Error> {
        serde_qs::from_str(url.query().unwrap_or_default())
            .map_err(|e| Error::InvalidRequest(format!("failed to parse parameters: {}", e)))
    }
}

/// Constructs a new resource from an URI.
///
/// The following URIs are supported:
/// - `memory:`
///   Uses an in-memory page store. Settings of [ResourceConfig] can be
///   passed as query parameters, e.g.
///   `memory://?hash_type=postorder&store_dewey_ids=true`.
pub fn from_addr(uri: &str) -> Result<MemoryResource, Error> {
    let url =
        Url::parse(uri).map_err(|e| Error::InvalidRequest(format!("unable to parse url: {}", e)))?;

    match url.scheme() {
        "memory" => {
            // memory doesn't support host or path in the URL.
            if url.has_host() || !url.path().is_empty() {
                return Err(Error::InvalidRequest("invalid url".to_string()));
            }
            Ok(MemoryResource::new(ResourceConfig::try_from(url)?))
        }
        scheme => Err(Error::InvalidRequest(format!("unknown scheme: {}", scheme))),
    }
}

#[cfg(test)]
mod tests {
    use super::{from_addr, HashType, ResourceConfig};
    use rstest::rstest;

    #[rstest]
    /// This uses an unsupported scheme.
    #[case::unsupported_scheme("http://foo.example/test", false)]
    /// This correctly sets the scheme, and doesn't set a path.
    #[case::memory_valid("memory://", true)]
    /// This sets a memory url host to `foo`
    #[case::memory_invalid_host("memory://foo", false)]
    /// This sets a memory url path to "/", which is invalid.
    #[case::memory_invalid_root_path("memory:///", false)]
    /// Valid settings passed as query parameters.
    #[case::memory_with_params("memory://?hash_type=postorder&store_dewey_ids=true", true)]
    /// Unknown hash type.
    #[case::memory_invalid_hash_type("memory://?hash_type=md5", false)]
    /// Unknown parameter.
    #[case::memory_unknown_param("memory://?compression=zstd", false)]
    fn test_from_addr(#[case] uri_str: &str, #[case] exp_succeed: bool) {
        if exp_succeed {
            from_addr(uri_str).expect("should succeed");
        } else {
            assert!(from_addr(uri_str).is_err(), "should fail");
        }
    }

    #[test]
    fn params_end_up_in_config() {
        let resource =
            from_addr("memory://?hash_type=postorder&store_dewey_ids=true").expect("must succeed");
        assert_eq!(
            &ResourceConfig {
                hash_type: HashType::Postorder,
                store_dewey_ids: true,
            },
            resource.config()
        );

        let resource = from_addr("memory://").expect("must succeed");
        assert_eq!(&ResourceConfig::default(), resource.config());
        assert_eq!(HashType::Rolling, resource.config().hash_type);
    }
}
