//! `mockall` doubles of the core ports for unit tests.

use async_trait::async_trait;
use mockall::mock;

use bc_core::error::ApiError;
use bc_core::form::FileRef;
use bc_core::ids::{AnimalId, OngId};
use bc_core::models::{
    AddressLookup, AdoptionProcess, Animal, AnimalPayload, AnimalQuery, AnimalSummary, AuthUser,
    CompanyRecord, Credentials, DonationCampaign, OngProfile, OngProfileUpdate, OngSignup, Page,
    UserProfile, UserProfileUpdate, UserSignup,
};
use bc_core::ports::{
    AdoptionPort, AnimalPort, AuthPort, DonationCatalogPort, FavoritePort, LookupPort, ProfilePort,
};

mock! {
    pub Auth {}

    #[async_trait]
    impl AuthPort for Auth {
        async fn signup_user(&self, signup: UserSignup) -> Result<AuthUser, ApiError>;
        async fn signup_ong(&self, signup: OngSignup, logo: Option<FileRef>)
            -> Result<AuthUser, ApiError>;
        async fn login(&self, credentials: Credentials) -> Result<AuthUser, ApiError>;
        async fn logout(&self) -> Result<(), ApiError>;
        async fn current_session(&self) -> Result<Option<AuthUser>, ApiError>;
    }
}

mock! {
    pub Animals {}

    #[async_trait]
    impl AnimalPort for Animals {
        async fn list(
            &self,
            query: &AnimalQuery,
            page: u32,
            limit: u32,
        ) -> Result<Page<AnimalSummary>, ApiError>;
        async fn get(&self, id: &AnimalId) -> Result<Animal, ApiError>;
        async fn create(&self, payload: AnimalPayload, photos: Vec<FileRef>)
            -> Result<Animal, ApiError>;
        async fn update(
            &self,
            id: &AnimalId,
            payload: AnimalPayload,
            photos: Vec<FileRef>,
        ) -> Result<Animal, ApiError>;
        async fn list_by_ong(&self, ong: &OngId) -> Result<Vec<AnimalSummary>, ApiError>;
    }
}

mock! {
    pub Profiles {}

    #[async_trait]
    impl ProfilePort for Profiles {
        async fn my_profile(&self) -> Result<UserProfile, ApiError>;
        async fn update_my_profile(&self, update: UserProfileUpdate)
            -> Result<UserProfile, ApiError>;
        async fn ong_profile(&self, id: &OngId) -> Result<OngProfile, ApiError>;
        async fn update_ong_profile(
            &self,
            update: OngProfileUpdate,
            logo: Option<FileRef>,
        ) -> Result<OngProfile, ApiError>;
    }
}

mock! {
    pub Lookup {}

    #[async_trait]
    impl LookupPort for Lookup {
        async fn address_by_cep(&self, cep: &str) -> Result<AddressLookup, ApiError>;
        async fn company_by_cnpj(&self, cnpj: &str) -> Result<CompanyRecord, ApiError>;
    }
}

mock! {
    pub Favorites {}

    #[async_trait]
    impl FavoritePort for Favorites {
        async fn list(&self) -> Result<Vec<AnimalSummary>, ApiError>;
        async fn add(&self, animal: &AnimalId) -> Result<(), ApiError>;
        async fn remove(&self, animal: &AnimalId) -> Result<(), ApiError>;
    }
}

mock! {
    pub Adoptions {}

    #[async_trait]
    impl AdoptionPort for Adoptions {
        async fn list(&self) -> Result<Vec<AdoptionProcess>, ApiError>;
    }
}

mock! {
    pub Donations {}

    #[async_trait]
    impl DonationCatalogPort for Donations {
        async fn campaigns(&self) -> Result<Vec<DonationCampaign>, ApiError>;
    }
}
