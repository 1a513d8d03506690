use crate::input::{self, InputError};
use library_scanner::scan_music_folder;
use playlist_manager::{PlaylistId, PlaylistManager, PlaylistStorage, Song, SongId};
use playlist_primitives::format_long_duration;
use std::io::{self, BufRead, Write};
use tracing::debug;

const MAIN_MENU: &str = "\
MAIN MENU
1. Create A Playlist
2. List Playlists
3. View Playlist Details
4. Add Song to Playlist
5. Remove Song from Playlist
6. Search Songs
7. Shuffle Playlist
8. Delete Playlist
9. Show Statistics
10. Scan Folder into Playlist
0. Save and Exit";

/// Line-oriented menu over any reader/writer pair
///
/// Every successful mutation is saved straight away. End of input behaves
/// like choosing exit.
pub struct Menu<'a, S: PlaylistStorage, R, W> {
    manager: &'a PlaylistManager<S>,
    input: R,
    output: W,
}

impl<'a, S, R, W> Menu<'a, S, R, W>
where
    S: PlaylistStorage,
    R: BufRead,
    W: Write,
{
    pub fn new(manager: &'a PlaylistManager<S>, input: R, output: W) -> Self {
        Self {
            manager,
            input,
            output,
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "Music Playlist Manager\n")?;

        loop {
            writeln!(self.output, "{}", MAIN_MENU)?;
            let Some(choice) = self.read_input("Enter your choice: ")? else {
                break;
            };

            match choice.as_str() {
                "1" => self.create_playlist()?,
                "2" => {
                    self.list_playlists()?;
                }
                "3" => self.view_playlist()?,
                "4" => self.add_song()?,
                "5" => self.remove_song()?,
                "6" => self.search_songs()?,
                "7" => self.shuffle_playlist()?,
                "8" => self.delete_playlist()?,
                "9" => self.show_statistics()?,
                "10" => self.scan_folder()?,
                "0" => break,
                other => {
                    debug!("Unknown menu choice {:?}", other);
                    writeln!(self.output, "Invalid option.")?;
                }
            }
            writeln!(self.output)?;
        }

        self.exit()
    }

    /// Prompt and read one trimmed line, `None` at end of input
    fn read_input(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn save(&mut self) -> io::Result<()> {
        if let Err(e) = self.manager.save() {
            writeln!(self.output, "Error saving data: {}", e)?;
        }
        Ok(())
    }

    fn report(&mut self, err: InputError) -> io::Result<()> {
        writeln!(self.output, "{}.", capitalize(&err.to_string()))
    }

    fn create_playlist(&mut self) -> io::Result<()> {
        writeln!(self.output, "\nCREATE NEW PLAYLIST")?;
        let Some(name) = self.read_input("Playlist name: ")? else {
            return Ok(());
        };
        let name = match input::required("Playlist name", &name) {
            Ok(name) => name,
            Err(e) => return self.report(e),
        };
        let description = self.read_input("Description: ")?.unwrap_or_default();

        let playlist = self.manager.create_playlist(&name, &description);
        writeln!(self.output, "Created playlist: {}", playlist)?;
        self.save()
    }

    /// Print the collection, returning false when it is empty
    fn list_playlists(&mut self) -> io::Result<bool> {
        let playlists = self.manager.list_playlists();
        if playlists.is_empty() {
            writeln!(self.output, "\nNo playlists found.")?;
            return Ok(false);
        }

        writeln!(self.output, "\nALL PLAYLISTS:")?;
        for (i, playlist) in playlists.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, playlist)?;
        }
        Ok(true)
    }

    /// List playlists and ask for one by id
    fn choose_playlist(&mut self, prompt: &str) -> io::Result<Option<PlaylistId>> {
        if !self.list_playlists()? {
            return Ok(None);
        }
        let Some(id) = self.read_input(prompt)? else {
            return Ok(None);
        };

        let id = PlaylistId::new(id);
        if let Err(e) = self.manager.get_playlist(&id) {
            writeln!(self.output, "{}", e)?;
            return Ok(None);
        }
        Ok(Some(id))
    }

    fn print_songs(&mut self, songs: &[Song]) -> io::Result<()> {
        for (i, song) in songs.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, song)?;
        }
        Ok(())
    }

    fn view_playlist(&mut self) -> io::Result<()> {
        let Some(id) = self.choose_playlist("\nEnter playlist ID: ")? else {
            return Ok(());
        };
        let playlist = match self.manager.get_playlist(&id) {
            Ok(playlist) => playlist,
            Err(e) => return writeln!(self.output, "{}", e),
        };

        writeln!(self.output, "\nPLAYLIST: {}", playlist.name())?;
        writeln!(self.output, "Description: {}", playlist.description())?;
        writeln!(
            self.output,
            "Created: {}",
            playlist.created_at().format("%Y-%m-%d %H:%M")
        )?;
        writeln!(self.output, "Total Songs: {}", playlist.len())?;
        writeln!(
            self.output,
            "Total Duration: {}",
            format_long_duration(playlist.total_duration())
        )?;

        if playlist.is_empty() {
            return writeln!(self.output, "(Empty playlist)");
        }
        self.print_songs(playlist.songs())
    }

    fn add_song(&mut self) -> io::Result<()> {
        let Some(id) = self.choose_playlist("\nEnter playlist ID: ")? else {
            return Ok(());
        };

        writeln!(self.output, "\nADD SONG")?;
        let Some(title) = self.read_input("Title: ")? else {
            return Ok(());
        };
        let title = match input::required("Title", &title) {
            Ok(title) => title,
            Err(e) => return self.report(e),
        };
        let artist = self.read_input("Artist: ")?.unwrap_or_default();
        let album = self.read_input("Album: ")?.unwrap_or_default();
        let genre = self.read_input("Genre: ")?.unwrap_or_default();

        let duration = self
            .read_input("Duration (MM:SS): ")?
            .unwrap_or_default();
        let duration = match input::parse_duration(&duration) {
            Ok(duration) => duration,
            Err(e) => return self.report(e),
        };
        let year = input::parse_year(&self.read_input("Year: ")?.unwrap_or_default());

        let song = Song::new(title, artist, duration)
            .with_album(album)
            .with_genre(genre)
            .with_year(year);

        match self.manager.add_song(&id, song) {
            Ok(song) => {
                writeln!(self.output, "Added song: {}", song)?;
                self.save()
            }
            Err(e) => writeln!(self.output, "{}", e),
        }
    }

    fn remove_song(&mut self) -> io::Result<()> {
        let Some(id) = self.choose_playlist("\nEnter playlist ID: ")? else {
            return Ok(());
        };
        let playlist = match self.manager.get_playlist(&id) {
            Ok(playlist) => playlist,
            Err(e) => return writeln!(self.output, "{}", e),
        };
        if playlist.is_empty() {
            return writeln!(self.output, "Playlist is empty.");
        }

        writeln!(self.output, "\nSONGS IN PLAYLIST:")?;
        self.print_songs(playlist.songs())?;

        let Some(song_id) = self.read_input("\nEnter song ID to remove: ")? else {
            return Ok(());
        };
        match self.manager.remove_song(&id, &SongId::new(song_id)) {
            Ok(true) => {
                writeln!(self.output, "Song removed successfully.")?;
                self.save()
            }
            Ok(false) => writeln!(self.output, "Song not found."),
            Err(e) => writeln!(self.output, "{}", e),
        }
    }

    fn search_songs(&mut self) -> io::Result<()> {
        let Some(query) = self.read_input("\nEnter search query: ")? else {
            return Ok(());
        };
        if query.is_empty() {
            return Ok(());
        }

        let results = self.manager.search_songs(&query);
        if results.is_empty() {
            return writeln!(self.output, "No songs found matching your query.");
        }

        writeln!(self.output, "\nFound {} result(s):", results.len())?;
        for (i, result) in results.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, result)?;
        }
        Ok(())
    }

    fn shuffle_playlist(&mut self) -> io::Result<()> {
        let Some(id) = self.choose_playlist("\nEnter playlist ID to shuffle: ")? else {
            return Ok(());
        };

        match self.manager.get_playlist(&id) {
            Ok(playlist) if playlist.is_empty() => return writeln!(self.output, "Playlist is empty."),
            Ok(_) => {}
            Err(e) => return writeln!(self.output, "{}", e),
        }

        match self.manager.shuffle_playlist(&id) {
            Ok(_) => {
                writeln!(self.output, "Playlist shuffled successfully.")?;
                self.save()
            }
            Err(e) => writeln!(self.output, "{}", e),
        }
    }

    fn delete_playlist(&mut self) -> io::Result<()> {
        let Some(id) = self.choose_playlist("\nEnter playlist ID to delete: ")? else {
            return Ok(());
        };

        let confirm = self.read_input("Are you sure? (yes/no): ")?;
        if !confirm.is_some_and(|answer| answer.eq_ignore_ascii_case("yes")) {
            return writeln!(self.output, "Deletion cancelled.");
        }

        match self.manager.delete_playlist(&id) {
            Ok(()) => {
                writeln!(self.output, "Playlist deleted successfully.")?;
                self.save()
            }
            Err(e) => writeln!(self.output, "{}", e),
        }
    }

    fn show_statistics(&mut self) -> io::Result<()> {
        let stats = self.manager.statistics();

        writeln!(self.output, "\nSTATISTICS")?;
        writeln!(self.output, "Total Playlists: {}", stats.total_playlists)?;
        writeln!(self.output, "Total Songs: {}", stats.total_songs)?;
        writeln!(
            self.output,
            "Total Duration: {}",
            format_long_duration(stats.total_duration)
        )?;

        writeln!(self.output, "\nTop Genres:")?;
        for (genre, count) in stats.genres_by_count() {
            writeln!(self.output, "  - {}: {} songs", genre, count)?;
        }
        writeln!(self.output, "\nTop Artists:")?;
        for (artist, count) in stats.artists_by_count() {
            writeln!(self.output, "  - {}: {} songs", artist, count)?;
        }
        Ok(())
    }

    fn scan_folder(&mut self) -> io::Result<()> {
        let Some(id) = self.choose_playlist("\nEnter playlist ID: ")? else {
            return Ok(());
        };
        let Some(folder) = self.read_input("Music folder: ")? else {
            return Ok(());
        };

        let songs = match scan_music_folder(&folder) {
            Ok(songs) => songs,
            Err(e) => return writeln!(self.output, "Scan failed: {}", e),
        };

        match self.manager.add_songs(&id, songs) {
            Ok(count) => {
                writeln!(self.output, "Added {} song(s) from {}", count, folder)?;
                self.save()
            }
            Err(e) => writeln!(self.output, "{}", e),
        }
    }

    fn exit(&mut self) -> io::Result<()> {
        writeln!(self.output, "\nSaving data...")?;
        self.save()?;
        writeln!(self.output, "Exiting.")
    }
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
