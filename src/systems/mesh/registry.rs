// every placed house that can be picked, in placement order
// filled once by the street layout and only read afterwards

use bevy::prelude::*;

use super::house::{NodeTag, PartHit, Structure};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StructureId(pub u32);

/// A ray hit resolved to the house that owns the hit part
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub structure: StructureId,
    pub part: PartHit,
}

#[derive(Resource, Clone, Debug, Default, PartialEq)]
pub struct PickableRegistry {
    structures: Vec<Structure>,
}

impl PickableRegistry {
    pub fn register(&mut self, structure: Structure) -> StructureId {
        debug_assert!(
            structure.tag() == NodeTag::Structure && structure.address().is_some_and(|a| !a.is_empty()),
            "registered structures must be tagged and addressed"
        );
        let id = StructureId(self.structures.len() as u32);
        self.structures.push(structure);
        id
    }

    pub fn get(&self, id: StructureId) -> Option<&Structure> {
        self.structures.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.structures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structures.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StructureId, &Structure)> {
        self.structures
            .iter()
            .enumerate()
            .map(|(i, s)| (StructureId(i as u32), s))
    }

    /// Closest hit over all registered houses
    /// equal distances keep the earlier registered house
    pub fn raycast(&self, ray: Ray3d) -> Option<Hit> {
        self.iter()
            .filter_map(|(id, structure)| structure.raycast(ray).map(|part| Hit { structure: id, part }))
            .fold(None, |closest: Option<Hit>, hit| match closest {
                Some(best) if best.part.distance <= hit.part.distance => Some(best),
                _ => Some(hit),
            })
    }
}
