//! In-memory repositories shared by the service tests.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use songbook_domain::artist::{Artist, NewArtist};
use songbook_domain::error::SongbookError;
use songbook_domain::id::{ArtistId, SongId};
use songbook_domain::song::{NewSong, Song};

use crate::ports::{ArtistRepository, SongRepository};

#[derive(Default)]
struct Store {
    artists: BTreeMap<ArtistId, Artist>,
    songs: BTreeMap<SongId, Song>,
    last_artist: i64,
    last_song: i64,
}

/// Both repositories view the same store so that artist deletion cascades.
#[derive(Clone, Default)]
pub(crate) struct InMemory {
    store: Arc<Mutex<Store>>,
}

impl InMemory {
    pub(crate) fn artists(&self) -> InMemoryArtistRepo {
        InMemoryArtistRepo(self.clone())
    }

    pub(crate) fn songs(&self) -> InMemorySongRepo {
        InMemorySongRepo(self.clone())
    }

    pub(crate) fn song_count(&self) -> usize {
        self.store.lock().unwrap().songs.len()
    }
}

pub(crate) struct InMemoryArtistRepo(InMemory);
pub(crate) struct InMemorySongRepo(InMemory);

impl ArtistRepository for InMemoryArtistRepo {
    fn create(
        &self,
        artist: NewArtist,
    ) -> impl Future<Output = Result<Artist, SongbookError>> + Send {
        let mut store = self.0.store.lock().unwrap();
        store.last_artist += 1;
        let artist = artist.into_artist(ArtistId::new(store.last_artist).unwrap());
        store.artists.insert(artist.id, artist.clone());
        async move { Ok(artist) }
    }

    fn get_by_id(
        &self,
        id: ArtistId,
    ) -> impl Future<Output = Result<Option<Artist>, SongbookError>> + Send {
        let result = self.0.store.lock().unwrap().artists.get(&id).cloned();
        async move { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Artist>, SongbookError>> + Send {
        let result: Vec<Artist> = self.0.store.lock().unwrap().artists.values().cloned().collect();
        async move { Ok(result) }
    }

    fn update(
        &self,
        artist: Artist,
    ) -> impl Future<Output = Result<Option<Artist>, SongbookError>> + Send {
        let mut store = self.0.store.lock().unwrap();
        let result = store
            .artists
            .get_mut(&artist.id)
            .map(|slot| {
                *slot = artist.clone();
                artist
            });
        async move { Ok(result) }
    }

    fn delete(&self, id: ArtistId) -> impl Future<Output = Result<bool, SongbookError>> + Send {
        let mut store = self.0.store.lock().unwrap();
        let removed = store.artists.remove(&id).is_some();
        store.songs.retain(|_, song| song.artist_id != id);
        async move { Ok(removed) }
    }
}

impl SongRepository for InMemorySongRepo {
    fn create(&self, song: NewSong) -> impl Future<Output = Result<Song, SongbookError>> + Send {
        let mut store = self.0.store.lock().unwrap();
        store.last_song += 1;
        let song = song.into_song(SongId::new(store.last_song).unwrap());
        store.songs.insert(song.id, song.clone());
        async move { Ok(song) }
    }

    fn get_by_id(
        &self,
        id: SongId,
    ) -> impl Future<Output = Result<Option<Song>, SongbookError>> + Send {
        let result = self.0.store.lock().unwrap().songs.get(&id).cloned();
        async move { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Song>, SongbookError>> + Send {
        let result: Vec<Song> = self.0.store.lock().unwrap().songs.values().cloned().collect();
        async move { Ok(result) }
    }

    fn find_by_artist(
        &self,
        artist_id: ArtistId,
    ) -> impl Future<Output = Result<Vec<Song>, SongbookError>> + Send {
        let result: Vec<Song> = self
            .0
            .store
            .lock()
            .unwrap()
            .songs
            .values()
            .filter(|song| song.artist_id == artist_id)
            .cloned()
            .collect();
        async move { Ok(result) }
    }

    fn update(
        &self,
        song: Song,
    ) -> impl Future<Output = Result<Option<Song>, SongbookError>> + Send {
        let mut store = self.0.store.lock().unwrap();
        let result = store.songs.get_mut(&song.id).map(|slot| {
            *slot = song.clone();
            song
        });
        async move { Ok(result) }
    }

    fn delete(&self, id: SongId) -> impl Future<Output = Result<bool, SongbookError>> + Send {
        let removed = self.0.store.lock().unwrap().songs.remove(&id).is_some();
        async move { Ok(removed) }
    }
}
