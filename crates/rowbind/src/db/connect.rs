use crate::{
    driver::{Connection, Driver},
    Error, Result,
};

use url::Url;

/// Picks a built-in driver from a connection URL.
#[derive(Debug)]
pub struct Connect {
    url: Url,
}

impl Connect {
    pub fn new(url: &str) -> Result<Self> {
        let url = Url::parse(url)
            .map_err(|err| Error::invalid_argument("url", format!("{err}; url={url}")))?;
        Ok(Self { url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl Driver for Connect {
    fn connect(&self) -> Result<Box<dyn Connection>> {
        match self.url.scheme() {
            "sqlite" => connect_sqlite(&self.url),
            scheme => Err(Error::unsupported_feature(format!(
                "unsupported database; scheme={scheme}; url={}",
                self.url
            ))),
        }
    }
}

#[cfg(feature = "sqlite")]
fn connect_sqlite(url: &Url) -> Result<Box<dyn Connection>> {
    rowbind_driver_sqlite::Sqlite::new(url.as_str())?.connect()
}

#[cfg(not(feature = "sqlite"))]
fn connect_sqlite(_url: &Url) -> Result<Box<dyn Connection>> {
    Err(Error::unsupported_feature("`sqlite` feature not enabled"))
}
