//! Image-loading collaborator interface.
//!
//! Image storage and decoding live outside this crate. A loader receives a
//! pet and a completion callback; it may call the callback right away or at
//! any later point. A successful completion updates the pet's record through
//! [`PetCollection::update_image`], which publishes `image_updated`.

use std::sync::Arc;

use pet_feeder_core::logging::targets;

use crate::error::ImageLoadError;
use crate::model::{ImageRef, PetCollection, PetView};

/// Completion handed to an [`ImageLoader`].
pub type ImageCallback = Box<dyn FnOnce(Result<ImageRef, ImageLoadError>) + Send>;

/// Resolves pet images.
///
/// Closures with the matching signature implement this trait.
pub trait ImageLoader {
    /// Starts resolving the image for `pet`, reporting through `done`.
    fn load(&self, pet: &PetView, done: ImageCallback);
}

impl<F> ImageLoader for F
where
    F: Fn(&PetView, ImageCallback),
{
    fn load(&self, pet: &PetView, done: ImageCallback) {
        self(pet, done)
    }
}

/// Asks `loader` for `pet`'s image and applies the result to `pets`.
///
/// The completion holds the collection weakly. Completions that arrive after
/// the pet was removed, or after the collection was dropped, are ignored.
/// Failures are logged and publish nothing.
pub fn request_image(pets: &Arc<PetCollection>, pet: &PetView, loader: &dyn ImageLoader) {
    tracing::debug!(target: targets::IMAGE, id = %pet.id(), "requesting image");
    loader.load(pet, completion(pets, pet));
}

fn completion(pets: &Arc<PetCollection>, pet: &PetView) -> ImageCallback {
    let pets = Arc::downgrade(pets);
    let pet = pet.clone();

    Box::new(move |result| match result {
        Ok(image) => match pets.upgrade() {
            Some(pets) => {
                if !pets.update_image(&pet, Some(image)) {
                    tracing::debug!(
                        target: targets::IMAGE,
                        id = %pet.id(),
                        "image completion ignored: pet removed or image unchanged"
                    );
                }
            }
            None => {
                tracing::debug!(target: targets::IMAGE, id = %pet.id(), "image completion after collection dropped");
            }
        },
        Err(error) => {
            tracing::warn!(target: targets::IMAGE, id = %pet.id(), %error, "image load failed");
        }
    })
}
