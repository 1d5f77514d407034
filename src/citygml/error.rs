use crate::math::NumericError;

#[derive(Debug, thiserror::Error)]
pub enum CityGmlError {
    #[error("numeric failure discretising geometry for {feature}: {source}")]
    Geometry {
        feature: String,
        #[source]
        source: NumericError,
    },
}

pub type Result<T> = std::result::Result<T, CityGmlError>;
