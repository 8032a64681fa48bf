pub use super::empresas::Entity as Empresas;
pub use super::form_answers::Entity as FormAnswers;
pub use super::form_fields::Entity as FormFields;
pub use super::form_responses::Entity as FormResponses;
pub use super::forms::Entity as Forms;
pub use super::grupo_lideres::Entity as GrupoLideres;
pub use super::grupos::Entity as Grupos;
pub use super::user_empresas::Entity as UserEmpresas;
pub use super::users::Entity as Users;
pub use super::visitantes::Entity as Visitantes;
