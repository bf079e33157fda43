//! A `Scene` is just the ordered collection of models a host wants drawn
//! in one frame. It owns its models outright; nothing elsewhere in the
//! crate keeps a back-reference into it.

use crate::mesh::Model;

#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub models: Vec<Model>,
}

impl Scene {
    pub fn new() -> Scene {
        Scene::default()
    }

    pub fn add(&mut self, model: Model) {
        self.models.push(model);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_appends_in_order() {
        let mut scene = Scene::new();
        scene.add(Model::new("a"));
        scene.add(Model::new("b"));
        assert_eq!(scene.models.len(), 2);
        assert_eq!(scene.models[0].name, "a");
        assert_eq!(scene.models[1].name, "b");
    }
}
