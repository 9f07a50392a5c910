pub mod entities;

pub use entities::{
    BatchFailure, EmbeddedFile, LmsContentDetails, LmsCourse, LmsCourseBundle, LmsFile,
    LmsItemKind, LmsModule, LmsModuleItem, LmsPage, LmsTerm, ResolvedItem, ResolvedModule,
};
