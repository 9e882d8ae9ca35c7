//! Built-in cooking assistant rule table. Order matters: the first match wins.

use super::{Predicate, Rule};

pub const WELCOME: &str = "Hi! I'm your Recipe AI Assistant. I can help you with recipes, cooking tips, ingredient substitutions, and more. How can I help you today?";

pub const DEFAULT_RESPONSE: &str = "I'd love to help! Could you tell me more about what you're looking for? For example:\n\n• \"What can I make with chicken?\"\n• \"Suggest a quick dinner recipe\"\n• \"How do I bake bread?\"\n• \"Healthy breakfast ideas\"\n• \"Vegetarian pasta recipes\"\n\nWhat sounds interesting to you?";

/// Shortcut label and the literal text it submits.
pub static SUGGESTIONS: [(&str, &str); 4] = [
    ("🍗 Chicken recipes", "What can I make with chicken?"),
    ("🍰 Dessert ideas", "Suggest a dessert recipe"),
    ("🍞 Baking tips", "How do I bake bread?"),
    ("🥗 Vegetarian", "Vegetarian recipe ideas"),
];

pub fn cooking_rules() -> Vec<Rule> {
    use Predicate as P;

    vec![
        Rule::new(
            "greeting",
            P::starts_with(&["hi", "hello", "hey", "good morning", "good afternoon", "good evening"]),
            "Hello! 👋 I'm here to help with all your cooking and recipe questions. What would you like to make today?",
        ),
        Rule::new(
            "chicken",
            P::contains(&["chicken"]),
            "Great choice! Here are some popular chicken recipes:\n\n🍗 Grilled Lemon Herb Chicken\n🍗 Creamy Garlic Chicken\n🍗 Honey Mustard Chicken\n🍗 Chicken Stir-Fry\n\nWould you like detailed instructions for any of these?",
        ),
        Rule::new(
            "beef",
            P::contains(&["beef", "steak"]),
            "Here are some delicious beef recipes:\n\n🥩 Classic Beef Stew\n🥩 Grilled Steak with Chimichurri\n🥩 Beef Tacos\n🥩 Shepherd's Pie\n🥩 Beef and Broccoli Stir-Fry\n\nWhich sounds appealing?",
        ),
        Rule::new(
            "pork",
            P::contains(&["pork"]),
            "Try these tasty pork dishes:\n\n🥓 Honey Glazed Pork Chops\n🥓 Pulled Pork Sandwiches\n🥓 Sweet and Sour Pork\n🥓 Pork Tenderloin with Apples\n\nLet me know if you want cooking tips!",
        ),
        Rule::new(
            "seafood",
            P::contains(&["fish", "salmon", "seafood"]),
            "Seafood is a great choice! Here are some ideas:\n\n🐟 Baked Salmon with Lemon\n🐟 Fish Tacos\n🐟 Shrimp Scampi\n🐟 Tuna Poke Bowl\n🐟 Grilled Mahi-Mahi\n\nAll healthy and delicious!",
        ),
        Rule::new(
            "dessert",
            P::contains(&["dessert", "sweet", "cake", "cookie"]),
            "I have some delicious dessert ideas for you:\n\n🍰 Chocolate Lava Cake\n🍪 Classic Chocolate Chip Cookies\n🥧 Apple Pie\n🍮 Crème Brûlée\n🍓 Strawberry Cheesecake\n\nWhat sounds good to you?",
        ),
        Rule::new(
            "baking",
            P::contains(&["bread", "bake", "baking"]),
            "Baking bread is wonderful! Here are some tips:\n\n1. Use warm water (not hot) for yeast activation\n2. Knead the dough for 8-10 minutes\n3. Let it rise in a warm place until doubled\n4. Preheat your oven to 375°F (190°C)\n5. Bake until golden brown and sounds hollow when tapped\n\nWould you like a specific bread recipe?",
        ),
        Rule::new(
            "vegetarian",
            P::contains(&["vegetarian", "vegan"]),
            "Here are some delicious vegetarian options:\n\n🥗 Mediterranean Quinoa Bowl\n🍝 Creamy Mushroom Pasta\n🌮 Black Bean Tacos\n🍛 Thai Green Curry\n🥙 Falafel Wrap\n\nAll these are packed with flavor and nutrients!",
        ),
        Rule::new(
            "gluten_free",
            P::contains(&["gluten free", "gluten-free"]),
            "Here are some great gluten-free options:\n\n✨ Grilled chicken with roasted vegetables\n✨ Rice paper spring rolls\n✨ Quinoa salad\n✨ Gluten-free pasta dishes\n✨ Corn tortilla tacos\n\nEating gluten-free can still be delicious!",
        ),
        Rule::new(
            "pasta",
            P::contains(&["pasta", "spaghetti", "noodle"]),
            "Pasta is always a great choice! Here are some favorites:\n\n🍝 Carbonara - creamy and indulgent\n🍝 Bolognese - hearty meat sauce\n🍝 Aglio e Olio - simple garlic and oil\n🍝 Pesto Pasta - fresh and herbaceous\n🍝 Lasagna - layered perfection\n\nWhich one interests you?",
        ),
        Rule::new(
            "quick",
            P::contains(&["quick", "easy", "fast", "30 min"]),
            "Looking for something quick? Try these 30-minute recipes:\n\n⚡ Stir-fried vegetables with rice\n⚡ Spaghetti Aglio e Olio\n⚡ Grilled cheese with tomato soup\n⚡ Quesadillas\n⚡ Egg fried rice\n\nAll delicious and ready in no time!",
        ),
        Rule::new(
            "healthy",
            P::contains(&["healthy", "diet", "low calorie", "nutritious"]),
            "Here are some healthy recipe options:\n\n💚 Grilled salmon with vegetables\n💚 Quinoa Buddha Bowl\n💚 Greek salad with grilled chicken\n💚 Zucchini noodles with pesto\n💚 Baked sweet potato with toppings\n\nEating healthy doesn't mean sacrificing flavor!",
        ),
        Rule::new(
            "breakfast",
            P::contains(&["breakfast", "morning"]),
            "Start your day right with these breakfast ideas:\n\n🌅 Fluffy Pancakes\n🌅 Avocado Toast\n🌅 Smoothie Bowl\n🌅 Eggs Benedict\n🌅 French Toast\n🌅 Oatmeal with berries\n\nWhat sounds good this morning?",
        ),
        Rule::new(
            "lunch",
            P::contains(&["lunch"]),
            "Here are some great lunch ideas:\n\n🥗 Caesar Salad with Grilled Chicken\n🥪 Club Sandwich\n🍜 Ramen Bowl\n🌯 Chicken Wrap\n🥙 Mediterranean Bowl\n\nPerfect for a midday meal!",
        ),
        Rule::new(
            "dinner",
            P::contains(&["dinner", "supper"]),
            "Looking for dinner inspiration? Here are some ideas:\n\n🍽️ Roasted Chicken with Vegetables\n🍽️ Beef Stir-Fry\n🍽️ Baked Salmon\n🍽️ Pasta Primavera\n🍽️ Tacos\n\nWhat type of cuisine are you in the mood for?",
        ),
        Rule::new(
            "snack",
            P::contains(&["snack", "appetizer"]),
            "Try these tasty snacks and appetizers:\n\n🍿 Homemade Popcorn\n🧀 Cheese Platter\n🥟 Spring Rolls\n🍤 Shrimp Cocktail\n🥨 Soft Pretzels\n\nPerfect for entertaining or snacking!",
        ),
        Rule::new(
            "technique",
            P::contains(&["how to cook", "how do i cook", "cooking"]),
            "I can help with cooking techniques! Common methods include:\n\n🔥 Grilling - high heat, great for meats\n🍳 Sautéing - quick cooking in a pan\n🥘 Braising - slow cooking in liquid\n♨️ Steaming - healthy, preserves nutrients\n🌡️ Roasting - dry heat in the oven\n\nWhat specifically would you like to learn about?",
        ),
        Rule::new(
            "ingredients",
            P::contains(&["ingredient", "substitute", "replace"]),
            "I can help with ingredient substitutions! Common ones include:\n\n• Butter → Coconut oil or Greek yogurt\n• Eggs → Flax eggs or applesauce\n• Milk → Almond, oat, or soy milk\n• Sugar → Honey or maple syrup\n• Flour → Almond flour or oat flour\n\nWhat specific ingredient do you need to substitute?",
        ),
        Rule::new(
            "italian",
            P::contains(&["italian"]),
            "Italian cuisine is amazing! Try these classics:\n\n🇮🇹 Margherita Pizza\n🇮🇹 Risotto\n🇮🇹 Osso Buco\n🇮🇹 Tiramisu\n🇮🇹 Caprese Salad\n\nBuon appetito!",
        ),
        Rule::new(
            "mexican",
            P::contains(&["mexican"]),
            "Love Mexican food! Here are some favorites:\n\n🇲🇽 Tacos al Pastor\n🇲🇽 Enchiladas\n🇲🇽 Guacamole\n🇲🇽 Quesadillas\n🇲🇽 Churros\n\n¡Delicioso!",
        ),
        Rule::new(
            "asian",
            P::contains(&["asian", "chinese", "thai"]),
            "Asian cuisine offers amazing flavors:\n\n🥢 Pad Thai\n🥢 Fried Rice\n🥢 Spring Rolls\n🥢 General Tso's Chicken\n🥢 Tom Yum Soup\n\nWhich style interests you most?",
        ),
        Rule::new(
            "tips",
            P::contains(&["tip", "advice", "trick"]),
            "Here are some essential cooking tips:\n\n💡 Always read the recipe fully before starting\n💡 Prep all ingredients before cooking (mise en place)\n💡 Season in layers for better flavor\n💡 Let meat rest after cooking\n💡 Taste as you go\n\nNeed tips on something specific?",
        ),
        Rule::new(
            "help",
            P::contains(&["help", "what can you"]),
            "I can help you with:\n\n✓ Recipe suggestions based on ingredients\n✓ Cooking techniques and tips\n✓ Ingredient substitutions\n✓ Meal planning ideas\n✓ Dietary preferences (vegan, vegetarian, etc.)\n✓ Baking advice\n✓ Cuisine recommendations\n\nJust ask me anything about cooking or recipes!",
        ),
        // "what can i make" OR ("have" AND ("ingredient" OR "food")).
        Rule::new(
            "pantry",
            P::any([
                P::contains(&["what can i make"]),
                P::all([P::contains(&["have"]), P::contains(&["ingredient", "food"])]),
            ]),
            "Great question! To help you find recipes with what you have:\n\n1. Use the Pantry feature on the left sidebar\n2. Add your available ingredients\n3. Click 'Show recipes' to see matches\n\nOr tell me what ingredients you have, and I'll suggest some recipes!",
        ),
        Rule::new(
            "duration",
            P::contains(&["how long", "how much time"]),
            "Cooking times vary by recipe:\n\n⏱️ Quick meals: 15-30 minutes\n⏱️ Standard recipes: 30-60 minutes\n⏱️ Slow-cooked dishes: 2-4 hours\n⏱️ Baking: 20-60 minutes\n\nWhat type of dish are you planning to make?",
        ),
        Rule::new(
            "temperature",
            P::contains(&["temperature", "how hot"]),
            "Common cooking temperatures:\n\n🌡️ Low: 250-300°F (120-150°C)\n🌡️ Medium: 325-375°F (160-190°C)\n🌡️ High: 400-450°F (200-230°C)\n🌡️ Broil: 500-550°F (260-290°C)\n\nWhat are you cooking?",
        ),
        Rule::new(
            "thanks",
            P::contains(&["thank"]),
            "You're very welcome! Happy cooking! 👨‍🍳 Let me know if you need anything else!",
        ),
        Rule::new(
            "farewell",
            P::starts_with(&["bye", "goodbye", "see you", "later"]),
            "Goodbye! Feel free to come back anytime you need cooking help. Happy cooking! 👋",
        ),
        Rule::new(
            "recipe",
            P::contains(&["recipe"]),
            "I'd love to help you find a recipe! What type of dish are you interested in? For example:\n\n• A specific ingredient (chicken, pasta, etc.)\n• Meal type (breakfast, lunch, dinner)\n• Cuisine (Italian, Mexican, Asian)\n• Dietary need (vegetarian, gluten-free)\n\nJust let me know what you're craving!",
        ),
        Rule::new(
            "make",
            P::contains(&["make", "cook"]),
            "What would you like to make? I can suggest recipes for:\n\n🍳 Specific ingredients you have\n⏱️ Quick 30-minute meals\n🥗 Healthy options\n🍰 Desserts and baking\n🌮 International cuisines\n\nTell me more about what you're looking for!",
        ),
    ]
}
