pub mod prelude;

pub mod empresas;
pub mod form_answers;
pub mod form_fields;
pub mod form_responses;
pub mod forms;
pub mod grupo_lideres;
pub mod grupos;
pub mod sea_orm_active_enums;
pub mod user_empresas;
pub mod users;
pub mod visitantes;
