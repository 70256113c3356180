//! In-memory record store and seed data.
//!
//! The store owns the pet and owner records plus the pet id sequence. It is
//! plain data behind the server state's lock; handlers take the lock, never
//! the store itself.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PetStatus {
    #[default]
    Available,
    Pending,
    Sold,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: u64,
    pub name: String,
    pub status: PetStatus,
    pub owner_id: u64,
    #[serde(default)]
    pub tag: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Owner {
    pub id: u64,
    pub name: String,
}

/// Body of `POST /pets`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetCreate {
    pub name: String,
    #[serde(default)]
    pub status: PetStatus,
    pub owner_id: u64,
    #[serde(default)]
    pub tag: Option<String>,
}

/// Body of `PUT /pets/{pet_id}`. Absent fields keep their current values.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<PetStatus>,
    #[serde(default)]
    pub owner_id: Option<u64>,
    #[serde(default)]
    pub tag: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PetList {
    pub items: Vec<Pet>,
    pub total: usize,
}

/// Pet id the sequence starts at after seeding.
const FIRST_UNSEEDED_PET_ID: u64 = 5;

#[derive(Debug)]
pub struct Store {
    pets: BTreeMap<u64, Pet>,
    owners: BTreeMap<u64, Owner>,
    next_pet_id: u64,
}

impl Store {
    /// A store holding the seed records the test caller expects: four pets
    /// across two owners.
    #[must_use]
    pub fn seeded() -> Self {
        let pets = [
            Pet {
                id: 1,
                name: "Rex".to_string(),
                status: PetStatus::Available,
                owner_id: 1,
                tag: None,
            },
            Pet {
                id: 2,
                name: "Whiskers".to_string(),
                status: PetStatus::Pending,
                owner_id: 1,
                tag: Some("indoor".to_string()),
            },
            Pet {
                id: 3,
                name: "Buddy".to_string(),
                status: PetStatus::Available,
                owner_id: 2,
                tag: None,
            },
            Pet {
                id: 4,
                name: "Coco".to_string(),
                status: PetStatus::Sold,
                owner_id: 2,
                tag: Some("exotic".to_string()),
            },
        ];
        let owners = [
            Owner {
                id: 1,
                name: "Alice".to_string(),
            },
            Owner {
                id: 2,
                name: "Bob".to_string(),
            },
        ];
        Self {
            pets: pets.into_iter().map(|p| (p.id, p)).collect(),
            owners: owners.into_iter().map(|o| (o.id, o)).collect(),
            next_pet_id: FIRST_UNSEEDED_PET_ID,
        }
    }

    #[must_use]
    pub fn pet(&self, id: u64) -> Option<Pet> {
        self.pets.get(&id).cloned()
    }

    #[must_use]
    pub fn pets(&self) -> Vec<Pet> {
        self.pets.values().cloned().collect()
    }

    #[must_use]
    pub fn owners(&self) -> Vec<Owner> {
        self.owners.values().cloned().collect()
    }

    #[must_use]
    pub fn contains_owner(&self, id: u64) -> bool {
        self.owners.contains_key(&id)
    }

    #[must_use]
    pub fn owner_pets(&self, owner_id: u64) -> Vec<Pet> {
        self.pets
            .values()
            .filter(|p| p.owner_id == owner_id)
            .cloned()
            .collect()
    }

    /// Insert a new pet under the next sequential id. Ids are never reused,
    /// even after deletes.
    pub fn insert_pet(&mut self, body: PetCreate) -> Pet {
        let id = self.next_pet_id;
        self.next_pet_id += 1;
        let pet = Pet {
            id,
            name: body.name,
            status: body.status,
            owner_id: body.owner_id,
            tag: body.tag,
        };
        self.pets.insert(id, pet.clone());
        pet
    }

    /// Apply the set fields of `update` to an existing pet.
    pub fn update_pet(&mut self, id: u64, update: PetUpdate) -> Option<Pet> {
        let pet = self.pets.get_mut(&id)?;
        if let Some(name) = update.name {
            pet.name = name;
        }
        if let Some(status) = update.status {
            pet.status = status;
        }
        if let Some(owner_id) = update.owner_id {
            pet.owner_id = owner_id;
        }
        if let Some(tag) = update.tag {
            pet.tag = Some(tag);
        }
        Some(pet.clone())
    }

    pub fn remove_pet(&mut self, id: u64) -> bool {
        self.pets.remove(&id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(name: &str) -> PetCreate {
        PetCreate {
            name: name.to_string(),
            status: PetStatus::Available,
            owner_id: 1,
            tag: None,
        }
    }

    #[test]
    fn seed_holds_four_pets_and_two_owners() {
        let store = Store::seeded();
        assert_eq!(store.pets().len(), 4);
        assert_eq!(store.owners().len(), 2);
        assert_eq!(store.owner_pets(1).len(), 2);
        assert_eq!(store.owner_pets(2).len(), 2);
    }

    #[test]
    fn inserted_pets_get_sequential_ids_starting_after_the_seed() {
        let mut store = Store::seeded();
        assert_eq!(store.insert_pet(create("a")).id, 5);
        assert_eq!(store.insert_pet(create("b")).id, 6);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut store = Store::seeded();
        let first = store.insert_pet(create("a")).id;
        assert!(store.remove_pet(first));
        assert_eq!(store.insert_pet(create("b")).id, first + 1);
    }

    #[test]
    fn update_touches_only_the_set_fields() {
        let mut store = Store::seeded();
        let updated = store
            .update_pet(
                2,
                PetUpdate {
                    status: Some(PetStatus::Sold),
                    ..PetUpdate::default()
                },
            )
            .expect("pet 2 exists");
        assert_eq!(updated.name, "Whiskers");
        assert_eq!(updated.status, PetStatus::Sold);
        assert_eq!(updated.tag.as_deref(), Some("indoor"));
    }

    #[test]
    fn update_of_missing_pet_is_none() {
        let mut store = Store::seeded();
        assert!(store.update_pet(99, PetUpdate::default()).is_none());
    }
}
