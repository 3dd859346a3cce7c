//! Domain models exchanged with the backend.

mod account;
mod address;
mod adoption;
pub mod animal;
mod donation;
mod page;

pub use account::{
    AccountKind, AuthUser, Credentials, OngProfile, OngProfileUpdate, OngSignup, UserProfile,
    UserProfileUpdate, UserSignup,
};
pub use address::{Address, AddressLookup, CompanyRecord};
pub use adoption::{AdoptionProcess, AdoptionStage};
pub use animal::{
    Animal, AnimalPayload, AnimalQuery, AnimalStatus, AnimalSummary, Sex, Size, Species,
};
pub use donation::DonationCampaign;
pub use page::Page;
