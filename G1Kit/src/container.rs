//! Loading a model and its textures from whatever buffer the user has
//!
//! A model can arrive on its own (optionally with a separate texture group
//! file) or packed inside a data table next to its texture group.

use crate::error::{Error, Result};
use crate::formats::common::{DataType, ParseOptions, classify};
use crate::formats::g1m::G1Model;
use crate::formats::g1t::G1TextureGroup;
use crate::formats::table::DataTable;

/// A model and the texture group that goes with it, borrowed from the
/// caller's buffers.
#[derive(Debug)]
pub struct LoadedContainer<'a> {
    /// Type of the outer buffer.
    pub source: DataType,
    pub model: G1Model<'a>,
    pub textures: Option<G1TextureGroup<'a>>,
}

impl<'a> LoadedContainer<'a> {
    /// Locate the model and texture group.
    ///
    /// A model buffer is loaded directly. A data table yields its first model
    /// entry and first texture group entry. A `texture_set` buffer that is a
    /// texture group takes precedence over one found in the table; any other
    /// `texture_set` is ignored with a warning.
    ///
    /// # Errors
    /// [`Error::UnsupportedContainer`] if `buffer` is neither a model nor a
    /// data table, [`Error::ModelNotFound`] if a data table holds no model,
    /// or any header parse error.
    pub fn load(buffer: &'a [u8], texture_set: Option<&'a [u8]>, options: ParseOptions) -> Result<Self> {
        let source = classify(buffer);
        let (model, mut textures) = match source {
            DataType::Model => (G1Model::with_options(buffer, options)?, None),
            DataType::DataTable => {
                let table = DataTable::read(buffer)?;
                let model = table
                    .first_of(DataType::Model)
                    .ok_or(Error::ModelNotFound)?;
                tracing::debug!("Using model entry {} of data table", model.name());
                let textures = table
                    .first_of(DataType::TextureGroup)
                    .map(|entry| G1TextureGroup::read(entry.data))
                    .transpose()?;
                (G1Model::with_options(model.data, options)?, textures)
            }
            other => return Err(Error::UnsupportedContainer(other)),
        };

        if let Some(set) = texture_set {
            match classify(set) {
                DataType::TextureGroup => textures = Some(G1TextureGroup::read(set)?),
                other => tracing::warn!("Ignoring texture set of type {other}"),
            }
        }

        Ok(Self {
            source,
            model,
            textures,
        })
    }
}
