//! Description interpreter and primitive value generators.
//!
//! [`Generator`] walks a `TypeDescription` and produces a [`Specimen`]:
//!
//! | Description | Specimen |
//! |-------------|----------|
//! | `string` | UUID v4 text |
//! | `number` | integral value in `[0, NUMBER_UPPER_BOUND]` |
//! | `boolean` | coin flip |
//! | `function` | placeholder callable |
//! | `date` | current time |
//! | `object` | empty object |
//! | `unknown` | one of object, number, boolean, string |
//! | `null` / `undefined` | themselves |
//! | `{flag: array}` | `ArrayLength` elements |
//! | `{flag: tuple}` | one element per position |
//! | `{flag: method}` | callable regenerating the return shape per call |
//! | `{flag: enum}` | one sampled possible value |
//! | member list | object of the keyed members, in order |
//!
//! The generator borrows its random source, so a seeded factory reproduces
//! the same tree.

use crate::config::{ArrayLength, FactoryConfig};
use crate::specimen::{Callable, Specimen};
use chrono::Utc;
use indexmap::IndexMap;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use specimen_common::limits::NUMBER_UPPER_BOUND;
use specimen_common::{
    DescriptionEntry, DescriptionFlag, LiteralValue, Primitive, PropertyDescriptor,
    TypeDescription,
};
use std::cell::RefCell;
use tracing::{debug, trace};

pub struct Generator<'a> {
    config: &'a FactoryConfig,
    rng: &'a mut dyn RngCore,
}

impl<'a> Generator<'a> {
    pub fn new(config: &'a FactoryConfig, rng: &'a mut dyn RngCore) -> Self {
        Generator { config, rng }
    }

    pub fn generate(&mut self, description: &TypeDescription) -> Specimen {
        match description {
            TypeDescription::Primitive(primitive) => self.primitive(*primitive),
            TypeDescription::Members(entries) => self.members(entries),
            TypeDescription::Property(descriptor) => self.descriptor(descriptor),
        }
    }

    fn descriptor(&mut self, descriptor: &PropertyDescriptor) -> Specimen {
        match descriptor.flag {
            Some(DescriptionFlag::Array) => {
                let count = self.array_length();
                trace!(count, "generating array");
                let items = (0..count)
                    .map(|_| self.generate(&descriptor.description))
                    .collect();
                Specimen::Array(items)
            }
            Some(DescriptionFlag::Tuple) => match &descriptor.description {
                TypeDescription::Members(slots) => {
                    Specimen::Array(slots.iter().map(|slot| self.entry(slot)).collect())
                }
                other => {
                    debug!(description = ?other, "tuple without positions");
                    Specimen::Array(Vec::new())
                }
            },
            Some(DescriptionFlag::Method) => {
                Specimen::Function(self.method(descriptor.description.clone()))
            }
            Some(DescriptionFlag::Enum) => {
                let values = descriptor.possible_values.as_deref().unwrap_or_default();
                match values.choose(&mut *self.rng) {
                    Some(value) => literal(value),
                    None => Specimen::Undefined,
                }
            }
            None => self.generate(&descriptor.description),
        }
    }

    /// An un-keyed slot: a tuple position.
    fn entry(&mut self, entry: &DescriptionEntry) -> Specimen {
        match entry {
            DescriptionEntry::Primitive(primitive) => self.primitive(*primitive),
            DescriptionEntry::Property(descriptor) => self.descriptor(descriptor),
        }
    }

    /// Keyed members become object fields; entries without a key are skipped.
    fn members(&mut self, entries: &[DescriptionEntry]) -> Specimen {
        let mut object = IndexMap::with_capacity(entries.len());
        for entry in entries {
            if let DescriptionEntry::Property(descriptor) = entry
                && let Some(key) = descriptor.key()
            {
                let value = self.descriptor(descriptor);
                object.insert(key.to_string(), value);
            }
        }
        Specimen::Object(object)
    }

    /// The callable owns a generator seeded from this one and draws fresh
    /// values on every call.
    fn method(&mut self, returns: TypeDescription) -> Callable {
        let rng = RefCell::new(StdRng::seed_from_u64(self.rng.next_u64()));
        let config = self.config.clone();
        Callable::new(move || {
            let mut rng = rng.borrow_mut();
            Generator::new(&config, &mut *rng).generate(&returns)
        })
    }

    fn array_length(&mut self) -> usize {
        match self.config.array_length {
            ArrayLength::Fixed(count) => count,
            ArrayLength::Range { min, max } if max <= min => min,
            ArrayLength::Range { min, max } => self.rng.gen_range(min..=max),
        }
    }

    // =========================================================================
    // Primitive Generators
    // =========================================================================

    pub fn primitive(&mut self, primitive: Primitive) -> Specimen {
        match primitive {
            Primitive::String => self.string(),
            Primitive::Number => self.number(),
            Primitive::Boolean => self.boolean(),
            Primitive::Function => Specimen::Function(Callable::placeholder()),
            Primitive::Date => Specimen::Date(Utc::now()),
            Primitive::Object => Specimen::object(),
            Primitive::Unknown => self.unknown(),
            Primitive::Null => Specimen::Null,
            Primitive::Undefined => Specimen::Undefined,
        }
    }

    /// A UUID v4 built from this generator's random bytes.
    pub fn string(&mut self) -> Specimen {
        let mut bytes = [0u8; 16];
        self.rng.fill_bytes(&mut bytes);
        let uuid = uuid::Builder::from_random_bytes(bytes).into_uuid();
        Specimen::String(uuid.to_string())
    }

    pub fn number(&mut self) -> Specimen {
        Specimen::Number(self.rng.gen_range(0..=NUMBER_UPPER_BOUND) as f64)
    }

    pub fn boolean(&mut self) -> Specimen {
        Specimen::Bool(self.rng.gen_bool(0.5))
    }

    /// One of the object, number, boolean and string generators, uniformly.
    pub fn unknown(&mut self) -> Specimen {
        match self.rng.gen_range(0..4) {
            0 => Specimen::object(),
            1 => self.number(),
            2 => self.boolean(),
            _ => self.string(),
        }
    }
}

fn literal(value: &LiteralValue) -> Specimen {
    match value {
        LiteralValue::Boolean(b) => Specimen::Bool(*b),
        LiteralValue::Number(n) => Specimen::Number(n.0),
        LiteralValue::String(s) => Specimen::String(s.clone()),
    }
}

#[cfg(test)]
#[path = "../tests/generators_tests.rs"]
mod tests;
