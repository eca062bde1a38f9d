use serde::Serialize;

use crate::model::Entity;

/// One entity collection plus its request flags.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Slice<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for Slice<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum SliceAction<T> {
    Started,
    Loaded(Vec<T>),
    Failed(String),
    Added(T),
    Updated(T),
    Removed(String),
}

impl<T: Entity> Slice<T> {
    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|it| it.id() == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        self.items.iter_mut().find(|it| it.id() == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Applies one action. Returns whether anything observable changed.
    pub fn reduce(&mut self, action: SliceAction<T>) -> bool {
        match action {
            SliceAction::Started => {
                self.loading = true;
                self.error = None;
                true
            }
            SliceAction::Loaded(mut items) => {
                items.iter_mut().for_each(Entity::normalize);
                // Later duplicates win, keeping the position of the first.
                let mut unique: Vec<T> = Vec::with_capacity(items.len());
                for it in items {
                    match unique.iter_mut().find(|u| u.id() == it.id()) {
                        Some(slot) => *slot = it,
                        None => unique.push(it),
                    }
                }
                self.items = unique;
                self.loading = false;
                self.error = None;
                true
            }
            SliceAction::Failed(message) => {
                self.loading = false;
                self.error = Some(message);
                true
            }
            SliceAction::Added(mut item) => {
                item.normalize();
                match self.get_mut(item.id()) {
                    Some(slot) => *slot = item,
                    None => self.items.push(item),
                }
                true
            }
            SliceAction::Updated(mut item) => {
                item.normalize();
                match self.get_mut(item.id()) {
                    Some(slot) => {
                        *slot = item;
                        true
                    }
                    None => false,
                }
            }
            SliceAction::Removed(id) => {
                let before = self.items.len();
                self.items.retain(|it| it.id() != id);
                before != self.items.len()
            }
        }
    }
}
