//! Card-list controller.
//!
//! `FeedController` presents a [`PetCollection`] as a flat list of
//! [`PetCardView`]s. It keeps no state of its own beyond the collection
//! handle: counts and indices always come from the collection, and its
//! signals are the collection's signals.

use std::sync::Arc;

use super::collection::PetCollection;
use super::signals::PetSignals;
use super::view::{PetCardView, PetView};
use crate::error::Result;

/// Card projection over a shared [`PetCollection`].
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use pet_feeder::model::{FeedController, PetCollection};
///
/// let feed = FeedController::new(Arc::new(PetCollection::new()));
/// feed.add("Rex");
///
/// let card = feed.card_at(0).unwrap();
/// assert_eq!(card.title(), "Rex");
/// assert_eq!(feed.index_of(&card), Some(0));
/// ```
#[derive(Debug, Clone)]
pub struct FeedController {
    pets: Arc<PetCollection>,
}

impl FeedController {
    /// Creates a controller over `pets`.
    pub fn new(pets: Arc<PetCollection>) -> Self {
        Self { pets }
    }

    /// Number of cards; always equal to the collection's count.
    pub fn card_count(&self) -> usize {
        self.pets.count()
    }

    /// Card for the pet at `index`.
    pub fn card_at(&self, index: usize) -> Result<PetCardView> {
        let pet = self.pets.at(index)?;
        Ok(PetCardView::new(pet, index))
    }

    /// Current index of the card's pet, or `None` if it was removed.
    pub fn index_of(&self, card: &PetCardView) -> Option<usize> {
        self.pets.index_of(card.pet())
    }

    /// Snapshot of every card in current order.
    pub fn cards(&self) -> Vec<PetCardView> {
        self.pets
            .views()
            .into_iter()
            .enumerate()
            .map(|(index, pet)| PetCardView::new(pet, index))
            .collect()
    }

    /// Adds a pet to the underlying collection.
    ///
    /// The collection publishes the events; the controller adds none.
    pub fn add(&self, name: impl Into<String>) -> PetView {
        self.pets.add(name)
    }

    /// The collection's signals.
    pub fn signals(&self) -> &PetSignals {
        self.pets.signals()
    }

    /// The underlying collection.
    pub fn collection(&self) -> &Arc<PetCollection> {
        &self.pets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;
    use parking_lot::Mutex;

    fn feed_of(names: &[&str]) -> FeedController {
        let pets = Arc::new(PetCollection::new());
        pets.replace_all(names.iter().copied());
        FeedController::new(pets)
    }

    #[test]
    fn test_card_count_tracks_collection() {
        let feed = feed_of(&["Rex"]);
        assert_eq!(feed.card_count(), 1);

        feed.collection().add("Mimi");
        assert_eq!(feed.card_count(), 2);

        feed.collection().remove_at(0).unwrap();
        assert_eq!(feed.card_count(), feed.collection().count());
    }

    #[test]
    fn test_card_at_projects_view() {
        let feed = feed_of(&["Rex", "Mimi"]);
        let card = feed.card_at(1).unwrap();

        assert_eq!(card.pet(), &feed.collection().at(1).unwrap());
        assert_eq!(card.title(), "Mimi");
        assert_eq!(card.position(), 1);

        assert_eq!(
            feed.card_at(2),
            Err(ModelError::IndexOutOfBounds { index: 2, count: 2 })
        );
    }

    #[test]
    fn test_index_of_follows_live_order() {
        let feed = feed_of(&["A", "B", "C"]);
        let c = feed.card_at(2).unwrap();
        let a = feed.card_at(0).unwrap();

        feed.collection().remove_at(0).unwrap();

        assert_eq!(feed.index_of(&c), Some(1));
        assert_eq!(c.position(), 2);
        assert_eq!(feed.index_of(&a), None);
    }

    #[test]
    fn test_cards_snapshot() {
        let feed = feed_of(&["A", "B"]);
        let cards = feed.cards();
        let titles: Vec<String> = cards.iter().map(PetCardView::title).collect();
        assert_eq!(titles, vec!["A", "B"]);
        assert_eq!(cards[1].position(), 1);
    }

    #[test]
    fn test_add_passes_through_collection_events() {
        let feed = feed_of(&[]);
        let added = Arc::new(Mutex::new(Vec::new()));

        let recv = added.clone();
        feed.signals().pet_added.connect(move |event| {
            recv.lock().push(event.index);
        });

        let rex = feed.add("Rex");
        assert_eq!(feed.collection().at(0).unwrap(), rex);
        assert_eq!(*added.lock(), vec![0]);
        // One connection only: the controller does not re-emit.
        assert_eq!(feed.signals().pet_added.connection_count(), 1);
    }
}
