diesel::table! {
    recipes (id) {
        id -> Uuid,
        #[max_length = 100]
        name -> Varchar,
        ingredients -> Array<Text>,
        instructions -> Text,
        prep_time -> Int8,
        cook_time -> Int8,
        servings -> Int8,
        category -> Varchar,
        difficulty -> Varchar,
        image_url -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}
