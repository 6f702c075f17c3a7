pub mod recordings;

pub use recordings::{
    delete_recording, download_audio, get_recording, list_recordings, upload_recording,
};
