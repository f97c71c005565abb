use crate::models::StyleOption;

/// The art-style catalog, in display order.
pub static STYLES: [StyleOption; 8] = [
    StyleOption {
        id: "pharaoh",
        name: "Sun King Pharaoh",
        description: "Majestic, with golden regalia and cinematic lighting.",
        prompt: "a photorealistic, cinematic portrait of a Pharaoh. The person should be adorned with a golden Nemes headdress, an ornate Usekh collar with lapis lazuli and carnelian, and rich linen robes. They should be holding a golden crook and flail. The background should be a grand, sunlit temple hall with towering pillars, in the style of a modern high-resolution photograph.",
    },
    StyleOption {
        id: "queen",
        name: "Majestic Queen",
        description: "Regal and divine, ruler of the Two Lands.",
        prompt: "a photorealistic, majestic portrait of a ruling Queen of Egypt. The person is adorned with an elaborate tripartite wig, a vulture headdress of Nekhbet, and a stunning Usekh collar. Her gown is of the finest, semi-translucent pleated linen. The background is her throne room, decorated with lotus motifs and gold leaf, illuminated by grand windows. The style should be powerful, elegant, and worthy of a divine ruler.",
    },
    StyleOption {
        id: "vizier",
        name: "Royal Vizier",
        description: "Wise and powerful, adorned in courtly finery.",
        prompt: "a photorealistic portrait of a powerful Royal Vizier of Ancient Egypt. The person wears elegant pleated linen garments, a significant gold necklace, and bracelets. They might be holding a papyrus scroll. The background is an opulent palace chamber with intricate carvings and decorations. The lighting is soft and dignified, like a formal court portrait.",
    },
    StyleOption {
        id: "priest",
        name: "Temple High Priest",
        description: "Mystical and serene, in sacred temple attire.",
        prompt: "a photorealistic, atmospheric portrait of an Ancient Egyptian High Priest. The person is dressed in clean white linen robes, with an ornate pectoral necklace and leopard skin stole. The setting is the inner sanctum of a temple, dimly lit by torches, with detailed hieroglyphs on the stone walls behind them. The style should be realistic and evocative.",
    },
    StyleOption {
        id: "guardian",
        name: "Guardian of the Nile",
        description: "Strong and stoic, protector of the ancient lands.",
        prompt: "a photorealistic, dramatic portrait of a Guardian of the Nile. The person is styled as an elite Medjay warrior or a noble protector, wearing ornate leather and bronze armor over linen. They hold a decorated spear or khopesh. The background is a view of the Nile river at dusk with pyramids in the distance. The style should be powerful and epic.",
    },
    StyleOption {
        id: "scribe",
        name: "Royal Scribe",
        description: "Keeper of knowledge, documenting history.",
        prompt: "a photorealistic, highly-detailed portrait of a Royal Scribe. The person is seated cross-legged on a mat, holding a palette and reed brush, with a papyrus scroll open before them. They are dressed in a simple, practical linen kilt. The setting is a library or archive, with shelves of scrolls in the background. The lighting is focused and natural, as if from a nearby window, highlighting their intellectual pursuit.",
    },
    StyleOption {
        id: "charioteer",
        name: "Elite Charioteer",
        description: "A swift and heroic warrior of the Pharaoh's army.",
        prompt: "a photorealistic, action-oriented portrait of an Elite Egyptian Charioteer. The person is depicted in a decorated chariot, wearing scale armor and holding a composite bow. Their expression is focused and determined. The background shows the vast desert with the sun low in the sky, creating long shadows and a dramatic, epic atmosphere. The image should convey speed and martial prowess.",
    },
    StyleOption {
        id: "goddess",
        name: "Divine Incarnation",
        description: "Ethereal beauty, touched by the gods.",
        prompt: "a photorealistic, ethereal portrait of a person as a divine incarnation, reminiscent of a god or goddess like Isis or Horus. They wear a simple, elegant white linen dress and subtle but significant golden jewelry, perhaps with a single divine symbol like the Eye of Horus. An otherworldly glow surrounds them, with a background of a starlit temple night sky. The style should be mystical, serene, and beautiful.",
    },
];

pub fn all() -> &'static [StyleOption] {
    &STYLES
}

pub fn find(id: &str) -> Option<&'static StyleOption> {
    STYLES.iter().find(|s| s.id == id)
}
