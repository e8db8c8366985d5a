/**
 * SvdRec
 * Copyright (C) 2018 Sebastian Schelter
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <http://www.gnu.org/licenses/>.
 */

use fnv::FnvHashMap;
use serde_json::Value;

use crate::error::{Result, SvdRecError};

pub const NO_ITEM_ENCODER: &str = "No ItemId -> Item-name Encoder Built!";
pub const NO_USER_ENCODER: &str = "No UserID -> Username Encoder Built!";

/// Maps one-based integer ids (keyed by their decimal string) to human readable names.
#[derive(Clone, Debug, Default)]
pub struct NameEncoder {
    names: FnvHashMap<String, String>,
}

impl NameEncoder {

    /// Expects a JSON object such as `{"1": "Toy Story", "2": "Heat"}`.
    pub fn from_json(value: &Value) -> Result<Self> {

        let object = value.as_object().ok_or_else(|| {
            SvdRecError::InvalidEncoder(String::from("expected a mapping from id to name"))
        })?;

        let mut names: FnvHashMap<String, String> =
            FnvHashMap::with_capacity_and_hasher(object.len(), Default::default());

        for (id, name) in object.iter() {
            let name = name.as_str().ok_or_else(|| {
                SvdRecError::InvalidEncoder(format!("name for id {} is not a string", id))
            })?;

            names.insert(id.clone(), name.to_owned());
        }

        Ok(NameEncoder { names })
    }

    pub fn from_map<I, K, V>(names: I) -> Self
        where I: IntoIterator<Item=(K, V)>, K: Into<String>, V: Into<String> {

        let names = names.into_iter()
            .map(|(id, name)| (id.into(), name.into()))
            .collect();

        NameEncoder { names }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn get(&self, id: usize) -> Option<&str> {
        self.names.get(&id.to_string()).map(String::as_str)
    }
}

/// Name of `id` from an optional encoder. Never fails: a missing encoder yields `no_encoder`, an
/// unknown id yields a placeholder naming the id.
pub fn lookup(encoder: Option<&NameEncoder>, id: usize, kind: &str, no_encoder: &str) -> String {
    match encoder {
        Some(encoder) => match encoder.get(id) {
            Some(name) => name.to_owned(),
            None => format!("Unknown {} #{}", kind, id),
        },
        None => no_encoder.to_owned(),
    }
}
